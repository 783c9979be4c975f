// BizzSummit - Bookings, Projects and Resources API
// Copyright (c) 2025 BizzSummit Contributors
// Licensed under the MIT License

//! # BizzSummit - Bookings, Projects and Resources API
//!
//! BizzSummit serves bookings, projects and resources as JSON documents
//! stored in Azure Cosmos DB, one container per resource kind.
//!
//! ## Overview
//!
//! Startup is fail-fast and idempotent:
//! - **Resolving** every kind's database, container and credentials from configuration
//! - **Provisioning** the database and the three containers (partitioned on `/id`)
//! - **Registering** exactly one service per kind
//! - **Serving** HTTP only after all of the above succeeded
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Startup orchestration and provisioning
//! - [`services`] - Per-kind resource services and the service registry
//! - [`http`] - Request pipeline, handlers and API documentation
//! - [`adapters`] - Document store integrations (Cosmos DB, in-memory)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bizzsummit::adapters::store::create_store_connector;
//! use bizzsummit::config::load_config;
//! use bizzsummit::core::startup::{Readiness, StartupCoordinator};
//! use bizzsummit::http::{bind, build_router, serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("bizzsummit.toml")?;
//!
//!     // Provision and register before anything is bound
//!     let connector = create_store_connector(config.store.target);
//!     let (services, _report) = StartupCoordinator::new(&config, connector).run().await?;
//!
//!     let state = AppState::new(services, Readiness::new());
//!     let app = build_router(&config, state.clone());
//!     let listener = bind(config.server.bind_addr).await?;
//!
//!     serve(listener, app, &state, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Startup failures carry one [`domain::StartupError`] per failed resource
//! kind inside [`domain::SummitError::StartupFailed`]:
//!
//! ```rust,no_run
//! use bizzsummit::domain::SummitError;
//!
//! fn report(error: &SummitError) {
//!     if let SummitError::StartupFailed { failures } = error {
//!         for failure in failures {
//!             eprintln!("{}: {failure}", failure.kind());
//!         }
//!     }
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod logging;
pub mod services;
