//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "bizzsummit.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing BizzSummit configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your Cosmos DB account", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set BIZZSUMMIT_COSMOS_KEY");
                println!("     - Set BIZZSUMMIT_API_KEY");
                println!("  3. Validate configuration: bizzsummit validate-config");
                println!("  4. Start the API: bizzsummit serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# BizzSummit Configuration File

[application]
log_level = "info"

[server]
bind_addr = "0.0.0.0:8080"

[store]
target = "cosmosdb"

[CosmosDb]
Account = "https://your-account.documents.azure.com:443/"
Key = "${BIZZSUMMIT_COSMOS_KEY}"
DatabaseName = "BizzSummit"
BookingsContainer = "Bookings"
ProjectsContainer = "Projects"
ResourcesContainer = "Resources"

[auth]
api_keys = ["${BIZZSUMMIT_API_KEY}"]
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# BizzSummit Configuration File
# Bookings, Projects and Resources API backed by Azure Cosmos DB
#
# Values of the form ${NAME} are read from the environment (or .env).
# Any setting can also be overridden with BIZZSUMMIT_<SECTION>_<KEY>,
# for example BIZZSUMMIT_SERVER_BIND_ADDR or BIZZSUMMIT_COSMOSDB_ACCOUNT.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[server]
# Address the HTTP listener binds to
bind_addr = "0.0.0.0:8080"

# Redirect plain HTTP to HTTPS (uses X-Forwarded-Proto behind a proxy)
https_redirect = true

# Public HTTPS port used in redirects (omit for 443)
# https_port = 8443

# Serve /swagger/v1/swagger.json and the API explorer
docs_enabled = true

# Explorer path prefix; empty mounts it at the root
docs_route_prefix = ""

[store]
# Store backend: cosmosdb or memory (memory keeps data in-process only)
target = "cosmosdb"

[CosmosDb]
Account = "https://your-account.documents.azure.com:443/"
Key = "${BIZZSUMMIT_COSMOS_KEY}"
DatabaseName = "BizzSummit"

# One container per resource kind, each partitioned on /id
BookingsContainer = "Bookings"
ProjectsContainer = "Projects"
ResourcesContainer = "Resources"

[startup]
# Upper bound for provisioning one resource kind, per attempt
provision_timeout_seconds = 30

# Extra attempts after a network failure or timeout (0-3)
retry_attempts = 1

# Delay before a retry, in milliseconds
retry_delay_ms = 1000

[auth]
# Require Authorization: Bearer <key> or X-Api-Key: <key> on /api routes
enabled = true
api_keys = ["${BIZZSUMMIT_API_KEY}"]

[logging]
# Emit console logs as JSON
json_console = false

# Write JSON logs to rotating files
local_enabled = false
local_path = "/var/log/bizzsummit"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
