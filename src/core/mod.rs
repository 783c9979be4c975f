//! Core orchestration for BizzSummit.
//!
//! # Modules
//!
//! - [`provisioning`] - Idempotent database and container provisioning
//! - [`startup`] - Startup coordination and readiness
//!
//! # Startup Workflow
//!
//! 1. **Resolve**: Read every kind's descriptor from the `CosmosDb` section
//! 2. **Connect**: Build one store client per kind
//! 3. **Provision**: Ensure databases and containers, concurrently, with a
//!    timeout per kind
//! 4. **Register**: Build the [`ServiceRegistry`](crate::services::ServiceRegistry)
//! 5. **Serve**: Bind the HTTP listener and mark the service ready
//!
//! # Example
//!
//! ```rust,no_run
//! use bizzsummit::adapters::store::create_store_connector;
//! use bizzsummit::config::load_config;
//! use bizzsummit::core::startup::StartupCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bizzsummit.toml")?;
//! let connector = create_store_connector(config.store.target);
//!
//! let coordinator = StartupCoordinator::new(&config, connector);
//! let (_registry, report) = coordinator.run().await?;
//!
//! println!("Provisioned {} resource kinds", report.outcomes.len());
//! # Ok(())
//! # }
//! ```

pub mod provisioning;
pub mod startup;
