//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SummitConfig;
use super::secret_string;
use crate::domain::errors::SummitError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SummitConfig
/// 4. Applies environment variable overrides (BIZZSUMMIT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use bizzsummit::config::loader::load_config;
///
/// let config = load_config("bizzsummit.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SummitConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SummitError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SummitError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration text
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn parse_config(contents: &str) -> Result<SummitConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SummitConfig = toml::from_str(&contents)
        .map_err(|e| SummitError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SummitError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SummitError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| SummitError::Configuration(format!("Invalid value for {name}: {e}")))
}

/// Applies environment variable overrides using BIZZSUMMIT_* prefix
///
/// Environment variables follow the pattern: BIZZSUMMIT_<SECTION>_<KEY>
/// For example: BIZZSUMMIT_COSMOSDB_ACCOUNT, BIZZSUMMIT_SERVER_BIND_ADDR
fn apply_env_overrides(config: &mut SummitConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_SERVER_BIND_ADDR") {
        config.server.bind_addr = parse_override("BIZZSUMMIT_SERVER_BIND_ADDR", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_SERVER_HTTPS_REDIRECT") {
        config.server.https_redirect = parse_override("BIZZSUMMIT_SERVER_HTTPS_REDIRECT", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_SERVER_HTTPS_PORT") {
        config.server.https_port = Some(parse_override("BIZZSUMMIT_SERVER_HTTPS_PORT", &val)?);
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_SERVER_DOCS_ENABLED") {
        config.server.docs_enabled = parse_override("BIZZSUMMIT_SERVER_DOCS_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_SERVER_DOCS_ROUTE_PREFIX") {
        config.server.docs_route_prefix = val;
    }

    // Store overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_STORE_TARGET") {
        config.store.target = parse_override("BIZZSUMMIT_STORE_TARGET", &val)?;
    }

    // Cosmos DB overrides
    let cosmos = &mut config.cosmos_db;
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_ACCOUNT") {
        cosmos.account = Some(val);
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_KEY") {
        cosmos.key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_DATABASE_NAME") {
        cosmos.database_name = Some(val);
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_BOOKINGS_CONTAINER") {
        cosmos.bookings_container = Some(val);
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_PROJECTS_CONTAINER") {
        cosmos.projects_container = Some(val);
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_COSMOSDB_RESOURCES_CONTAINER") {
        cosmos.resources_container = Some(val);
    }

    // Startup overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_STARTUP_PROVISION_TIMEOUT_SECONDS") {
        config.startup.provision_timeout_seconds =
            parse_override("BIZZSUMMIT_STARTUP_PROVISION_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_STARTUP_RETRY_ATTEMPTS") {
        config.startup.retry_attempts = parse_override("BIZZSUMMIT_STARTUP_RETRY_ATTEMPTS", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_STARTUP_RETRY_DELAY_MS") {
        config.startup.retry_delay_ms = parse_override("BIZZSUMMIT_STARTUP_RETRY_DELAY_MS", &val)?;
    }

    // Auth overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_AUTH_ENABLED") {
        config.auth.enabled = parse_override("BIZZSUMMIT_AUTH_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_AUTH_API_KEYS") {
        config.auth.api_keys = val
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| secret_string(k.to_string()))
            .collect();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("BIZZSUMMIT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("BIZZSUMMIT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
    if let Ok(val) = std::env::var("BIZZSUMMIT_LOGGING_JSON_CONSOLE") {
        config.logging.json_console = parse_override("BIZZSUMMIT_LOGGING_JSON_CONSOLE", &val)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StoreTarget;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("BIZZSUMMIT_LOADER_TEST_VAR", "test_value");
        let input = "Key = \"${BIZZSUMMIT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "Key = \"test_value\"\n");
        std::env::remove_var("BIZZSUMMIT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("BIZZSUMMIT_LOADER_MISSING_VAR");
        let input = "Key = \"${BIZZSUMMIT_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("BIZZSUMMIT_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# Key = \"${BIZZSUMMIT_LOADER_COMMENTED_OUT}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[store]
target = "memory"

[CosmosDb]
DatabaseName = "BizzSummit"
BookingsContainer = "Bookings"
ProjectsContainer = "Projects"
ResourcesContainer = "Resources"

[auth]
api_keys = ["loader-test-key"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.store.target, StoreTarget::Memory);
        assert_eq!(
            config.cosmos_db.database_name.as_deref(),
            Some("BizzSummit")
        );
        assert_eq!(config.auth.api_keys.len(), 1);
    }

    #[test]
    fn test_parse_config_rejects_invalid_section() {
        let result = parse_config(
            r#"
[application]
log_level = "loud"

[auth]
enabled = false
"#,
        );
        assert!(matches!(result, Err(SummitError::Configuration(_))));
    }
}
