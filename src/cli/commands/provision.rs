//! Provision command implementation
//!
//! Creates the database and the per-kind containers, then exits. Meant
//! for deployment jobs that prepare the store ahead of rollout.

use super::exit_code_for;
use crate::adapters::store::create_store_connector;
use crate::config::load_config;
use crate::core::startup::StartupCoordinator;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the provision command
#[derive(Args, Debug, Default)]
pub struct ProvisionArgs {}

impl ProvisionArgs {
    /// Execute the provision command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Provisioning store");

        println!("🔧 Provisioning store resources");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let connector = create_store_connector(config.store.target);
        let report = match StartupCoordinator::new(&config, connector)
            .provision_only()
            .await
        {
            Ok(report) => report,
            Err(e) => {
                log_error_with_context!(&e, "Provisioning failed");
                println!("❌ Provisioning failed");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        for outcome in &report.outcomes {
            let state = if outcome.container_created {
                "created"
            } else {
                "already present"
            };
            println!(
                "✅ {}: {}/{} {} ({} attempt(s), {} ms)",
                outcome.kind,
                outcome.database_name,
                outcome.container_name,
                state,
                outcome.attempts,
                outcome.duration.as_millis()
            );
        }
        println!();

        Ok(0)
    }
}
