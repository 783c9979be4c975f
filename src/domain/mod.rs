//! Domain models and types for BizzSummit.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Resource kinds** ([`ResourceKind`]) and where they are stored ([`ResourceDescriptor`])
//! - **Documents** ([`Document`]) handled by the API
//! - **Error types** ([`SummitError`], [`StartupError`], [`CosmosDbError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SummitError>`]:
//!
//! ```rust
//! use bizzsummit::domain::{SummitError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = bizzsummit::config::load_config("bizzsummit.toml")?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod resource;
pub mod result;

pub use document::Document;
pub use errors::{CosmosDbError, StartupError, SummitError};
pub use resource::{ResourceDescriptor, ResourceKind, PARTITION_KEY_PATH};
pub use result::Result;
