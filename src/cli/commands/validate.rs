//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the BizzSummit configuration file.

use crate::config::load_config;
use crate::domain::ResourceKind;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Besides parsing and validating the file, resolves every resource
    /// kind so missing `CosmosDb` values are reported up front.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let descriptors = match config.cosmos_db.resolve_all(config.store.target) {
            Ok(descriptors) => descriptors,
            Err(failures) => {
                println!("❌ Store configuration is incomplete");
                for failure in failures {
                    println!("   {failure}");
                }
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bind Address: {}", config.server.bind_addr);
        println!("  HTTPS Redirect: {}", config.server.https_redirect);
        if config.server.docs_enabled {
            println!("  API Explorer: {}", config.server.explorer_path());
        }
        println!("  Store Target: {:?}", config.store.target);
        if let Some(first) = descriptors.first() {
            println!("  Account: {}", first.account);
            println!("  Database: {}", first.database_name);
        }
        for kind in ResourceKind::ALL {
            if let Some(container) = config.cosmos_db.container_name(kind) {
                println!("  {kind} Container: {container}");
            }
        }
        println!(
            "  Authorization: {}",
            if config.auth.enabled {
                format!("{} API key(s)", config.auth.api_keys.len())
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
