//! Configuration schema types
//!
//! This module defines the configuration structure for BizzSummit. The
//! `[CosmosDb]` section keeps the PascalCase key names the deployment
//! tooling already uses (`DatabaseName`, `BookingsContainer`, `Account`, ...).

use crate::config::{secret_string, SecretString};
use crate::domain::{ResourceDescriptor, ResourceKind, StartupError};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Document store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreTarget {
    /// Azure Cosmos DB
    #[default]
    CosmosDB,
    /// In-process store for local development and tests
    Memory,
}

impl StoreTarget {
    /// Whether `Account` and `Key` must be configured
    pub fn requires_credentials(self) -> bool {
        matches!(self, StoreTarget::CosmosDB)
    }
}

impl std::str::FromStr for StoreTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosmosdb" => Ok(StoreTarget::CosmosDB),
            "memory" => Ok(StoreTarget::Memory),
            other => Err(format!(
                "Invalid store.target '{other}'. Must be one of: cosmosdb, memory"
            )),
        }
    }
}

/// Main BizzSummit configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummitConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Store backend selection
    #[serde(default)]
    pub store: StoreConfig,

    /// Cosmos DB account, database and per-kind containers
    #[serde(rename = "CosmosDb", default)]
    pub cosmos_db: CosmosDbSection,

    /// Startup phase settings
    #[serde(default)]
    pub startup: StartupConfig,

    /// API authorization
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SummitConfig {
    /// Validates the configuration
    ///
    /// Presence of the per-kind `CosmosDb` values is checked when the
    /// startup phase resolves descriptors, so that a missing value is
    /// reported as [`StartupError::ConfigMissing`] for its kind.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.cosmos_db.validate()?;
        self.startup.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Redirect plain HTTP requests to HTTPS
    ///
    /// The server itself speaks plain HTTP; TLS is terminated by the
    /// ingress, which reports the original scheme in `X-Forwarded-Proto`.
    #[serde(default)]
    pub https_redirect: bool,

    /// Public HTTPS port used in redirect locations (omitted when 443 or unset)
    #[serde(default)]
    pub https_port: Option<u16>,

    /// Serve the OpenAPI document and the interactive explorer
    #[serde(default = "default_true")]
    pub docs_enabled: bool,

    /// Path prefix of the interactive explorer ("" mounts it at the root)
    #[serde(default)]
    pub docs_route_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            https_redirect: false,
            https_port: None,
            docs_enabled: true,
            docs_route_prefix: String::new(),
        }
    }
}

impl ServerConfig {
    /// Path the interactive explorer is mounted at
    pub fn explorer_path(&self) -> String {
        let prefix = self.docs_route_prefix.trim_matches('/');
        if prefix.is_empty() {
            "/".to_string()
        } else {
            format!("/{prefix}")
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.https_port == Some(0) {
            return Err("server.https_port must be > 0".to_string());
        }

        let prefix = self.docs_route_prefix.trim_matches('/');
        if prefix.starts_with("api") || prefix.starts_with("health") || prefix.starts_with("swagger")
        {
            return Err(format!(
                "server.docs_route_prefix '{}' collides with a reserved route",
                self.docs_route_prefix
            ));
        }
        if prefix.contains(['{', '}', '*']) {
            return Err(format!(
                "server.docs_route_prefix '{}' cannot contain route parameters",
                self.docs_route_prefix
            ));
        }

        Ok(())
    }
}

/// Store backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (cosmosdb or memory)
    #[serde(default)]
    pub target: StoreTarget,
}

/// The `[CosmosDb]` configuration section
///
/// Values are optional at parse time; a missing or empty value fails
/// startup for the kind that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosmosDbSection {
    /// Logical database shared by all kinds
    #[serde(default)]
    pub database_name: Option<String>,

    /// Container holding bookings
    #[serde(default)]
    pub bookings_container: Option<String>,

    /// Container holding projects
    #[serde(default)]
    pub projects_container: Option<String>,

    /// Container holding resources
    #[serde(default)]
    pub resources_container: Option<String>,

    /// Account endpoint URL
    #[serde(default)]
    pub account: Option<String>,

    /// Account key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub key: Option<SecretString>,
}

const MEMORY_ACCOUNT: &str = "memory://local";

impl CosmosDbSection {
    /// Configured container name for `kind`
    pub fn container_name(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Bookings => self.bookings_container.as_deref(),
            ResourceKind::Projects => self.projects_container.as_deref(),
            ResourceKind::Resources => self.resources_container.as_deref(),
        }
    }

    /// Resolve the descriptor for one kind
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::ConfigMissing`] naming the first missing or
    /// empty key.
    pub fn resolve(
        &self,
        kind: ResourceKind,
        target: StoreTarget,
    ) -> Result<ResourceDescriptor, StartupError> {
        let database_name = required(self.database_name.as_deref(), kind, "DatabaseName")?;
        let container_name = required(self.container_name(kind), kind, kind.container_key())?;

        let (account, key) = if target.requires_credentials() {
            let account = required(self.account.as_deref(), kind, "Account")?;
            let key = match &self.key {
                Some(key) if !key.expose_secret().is_blank() => key.clone(),
                _ => return Err(StartupError::ConfigMissing { kind, key: "Key" }),
            };
            (account, key)
        } else {
            let account = self
                .account
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or(MEMORY_ACCOUNT)
                .to_string();
            let key = self
                .key
                .clone()
                .unwrap_or_else(|| secret_string(String::new()));
            (account, key)
        };

        Ok(ResourceDescriptor {
            kind,
            database_name,
            container_name,
            account,
            key,
        })
    }

    /// Resolve descriptors for every kind
    ///
    /// All kinds are checked so that every missing value is reported at
    /// once.
    ///
    /// # Errors
    ///
    /// Returns one [`StartupError`] per kind that could not be resolved.
    pub fn resolve_all(
        &self,
        target: StoreTarget,
    ) -> Result<Vec<ResourceDescriptor>, Vec<StartupError>> {
        let mut descriptors = Vec::with_capacity(ResourceKind::ALL.len());
        let mut failures = Vec::new();

        for kind in ResourceKind::ALL {
            match self.resolve(kind, target) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Ok(descriptors)
        } else {
            Err(failures)
        }
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(account) = self.account.as_deref().filter(|a| !a.trim().is_empty()) {
            let url = url::Url::parse(account)
                .map_err(|e| format!("CosmosDb.Account '{account}' is not a valid URL: {e}"))?;
            if url.scheme() != "https" && url.scheme() != "memory" {
                return Err("CosmosDb.Account must start with https://".to_string());
            }
        }

        Ok(())
    }
}

fn required(value: Option<&str>, kind: ResourceKind, key: &'static str) -> Result<String, StartupError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(StartupError::ConfigMissing { kind, key }),
    }
}

/// Startup phase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Upper bound for provisioning one resource kind, per attempt
    #[serde(default = "default_provision_timeout_seconds")]
    pub provision_timeout_seconds: u64,

    /// Extra attempts after a transient provisioning failure
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Delay before a retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            provision_timeout_seconds: default_provision_timeout_seconds(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl StartupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.provision_timeout_seconds == 0 {
            return Err("startup.provision_timeout_seconds must be > 0".to_string());
        }

        if self.retry_attempts > 3 {
            return Err(format!(
                "startup.retry_attempts must be <= 3, got {}",
                self.retry_attempts
            ));
        }

        Ok(())
    }
}

/// API authorization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require an API key on `/api` routes
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Accepted API keys
    #[serde(default)]
    pub api_keys: Vec<SecretString>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_keys: Vec::new(),
        }
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled
            && self
                .api_keys
                .iter()
                .all(|key| key.expose_secret().is_blank())
        {
            return Err(
                "auth.api_keys must contain at least one key when auth.enabled = true".to_string(),
            );
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON instead of human-readable text
    #[serde(default)]
    pub json_console: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json_console: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_provision_timeout_seconds() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_local_path() -> String {
    "/var/log/bizzsummit".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
