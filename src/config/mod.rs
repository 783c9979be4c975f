//! Configuration management for BizzSummit.
//!
//! BizzSummit reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `BIZZSUMMIT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Bind address, HTTPS redirect, API documentation
//! - [`StoreConfig`] - Store backend (`cosmosdb` or `memory`)
//! - [`CosmosDbSection`] - Account, key, database and per-kind containers
//! - [`StartupConfig`] - Provisioning timeout and retry
//! - [`AuthConfig`] - API keys
//! - [`LoggingConfig`] - Console and file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0:8080"
//! https_redirect = true
//!
//! [CosmosDb]
//! Account = "https://your-account.documents.azure.com:443/"
//! Key = "${BIZZSUMMIT_COSMOS_KEY}"
//! DatabaseName = "BizzSummit"
//! BookingsContainer = "Bookings"
//! ProjectsContainer = "Projects"
//! ResourcesContainer = "Resources"
//!
//! [auth]
//! api_keys = ["${BIZZSUMMIT_API_KEY}"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AuthConfig, CosmosDbSection, LoggingConfig, ServerConfig, StartupConfig,
    StoreConfig, StoreTarget, SummitConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
