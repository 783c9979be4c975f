//! Domain error types
//!
//! This module defines the error hierarchy for BizzSummit.
//! All errors are domain-specific and don't expose third-party types.

use super::resource::ResourceKind;
use thiserror::Error;

/// Main BizzSummit error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SummitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single startup step failed
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Startup failed for one or more resource kinds
    #[error("Startup failed for {} resource kind(s): {}", .failures.len(), join_failures(.failures))]
    StartupFailed { failures: Vec<StartupError> },

    /// Cosmos DB-related errors
    #[error("Cosmos DB error: {0}")]
    CosmosDb(#[from] CosmosDbError),

    /// Document store errors outside of Cosmos DB (in-memory backend)
    #[error("Store error: {0}")]
    Store(String),

    /// Document validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

fn join_failures(failures: &[StartupError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Startup errors
///
/// Every variant names the resource kind it belongs to so that each
/// provisioning operation can report its own outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartupError {
    /// A required configuration key is missing or empty
    #[error("{kind}: missing configuration value CosmosDb:{key}")]
    ConfigMissing {
        kind: ResourceKind,
        key: &'static str,
    },

    /// The store rejected the credentials
    #[error("{kind}: authentication failed: {message}")]
    AuthFailed { kind: ResourceKind, message: String },

    /// The store endpoint could not be reached
    #[error("{kind}: store endpoint unreachable: {message}")]
    NetworkUnreachable { kind: ResourceKind, message: String },

    /// Database or container creation failed for any other reason
    #[error("{kind}: create failed: {message}")]
    CreateFailed { kind: ResourceKind, message: String },

    /// Provisioning did not finish within the configured timeout
    #[error("{kind}: provisioning timed out after {seconds}s")]
    TimedOut { kind: ResourceKind, seconds: u64 },
}

impl StartupError {
    /// Resource kind the error belongs to
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::ConfigMissing { kind, .. }
            | Self::AuthFailed { kind, .. }
            | Self::NetworkUnreachable { kind, .. }
            | Self::CreateFailed { kind, .. }
            | Self::TimedOut { kind, .. } => *kind,
        }
    }

    /// Whether a retry could plausibly succeed
    ///
    /// Credential and configuration problems never fix themselves.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkUnreachable { .. } | Self::TimedOut { .. })
    }

    /// Build a startup error for `kind` from a store error
    pub fn from_store_error(kind: ResourceKind, error: &SummitError) -> Self {
        match error {
            SummitError::Startup(inner) => inner.clone(),
            SummitError::CosmosDb(CosmosDbError::AuthenticationFailed(message)) => {
                Self::AuthFailed {
                    kind,
                    message: message.clone(),
                }
            }
            SummitError::CosmosDb(CosmosDbError::ConnectionFailed(message)) => {
                Self::NetworkUnreachable {
                    kind,
                    message: message.clone(),
                }
            }
            other => Self::CreateFailed {
                kind,
                message: other.to_string(),
            },
        }
    }
}

/// Cosmos DB-specific errors
///
/// Errors that occur when interacting with Azure Cosmos DB.
/// These errors don't expose third-party SDK types.
#[derive(Debug, Error)]
pub enum CosmosDbError {
    /// Failed to connect to Cosmos DB
    #[error("Failed to connect to Cosmos DB: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to create database
    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),

    /// Failed to create container
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// Failed to read a document
    #[error("Failed to read document: {0}")]
    ReadFailed(String),

    /// Failed to write document
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// Failed to delete document
    #[error("Failed to delete document: {0}")]
    DeleteFailed(String),

    /// Failed to deserialize response
    #[error("Failed to deserialize response: {0}")]
    DeserializationFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SummitError {
    fn from(err: std::io::Error) -> Self {
        SummitError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SummitError {
    fn from(err: serde_json::Error) -> Self {
        SummitError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SummitError {
    fn from(err: toml::de::Error) -> Self {
        SummitError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summit_error_display() {
        let err = SummitError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_config_missing_display_names_key() {
        let err = StartupError::ConfigMissing {
            kind: ResourceKind::Projects,
            key: "ProjectsContainer",
        };
        assert_eq!(
            err.to_string(),
            "Projects: missing configuration value CosmosDb:ProjectsContainer"
        );
    }

    #[test]
    fn test_startup_failed_lists_every_kind() {
        let err = SummitError::StartupFailed {
            failures: vec![
                StartupError::TimedOut {
                    kind: ResourceKind::Bookings,
                    seconds: 5,
                },
                StartupError::AuthFailed {
                    kind: ResourceKind::Resources,
                    message: "401".to_string(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 resource kind(s)"));
        assert!(text.contains("Bookings: provisioning timed out after 5s"));
        assert!(text.contains("Resources: authentication failed: 401"));
    }

    #[test]
    fn test_transient_classification() {
        let kind = ResourceKind::Bookings;
        assert!(StartupError::NetworkUnreachable {
            kind,
            message: String::new()
        }
        .is_transient());
        assert!(StartupError::TimedOut { kind, seconds: 1 }.is_transient());
        assert!(!StartupError::AuthFailed {
            kind,
            message: String::new()
        }
        .is_transient());
        assert!(!StartupError::ConfigMissing { kind, key: "Key" }.is_transient());
    }

    #[test]
    fn test_from_store_error_maps_cosmos_variants() {
        let kind = ResourceKind::Projects;
        let auth = SummitError::CosmosDb(CosmosDbError::AuthenticationFailed("bad key".into()));
        assert!(matches!(
            StartupError::from_store_error(kind, &auth),
            StartupError::AuthFailed { .. }
        ));

        let net = SummitError::CosmosDb(CosmosDbError::ConnectionFailed("refused".into()));
        assert!(matches!(
            StartupError::from_store_error(kind, &net),
            StartupError::NetworkUnreachable { .. }
        ));

        let create =
            SummitError::CosmosDb(CosmosDbError::ContainerCreationFailed("bad name".into()));
        let mapped = StartupError::from_store_error(kind, &create);
        assert!(matches!(mapped, StartupError::CreateFailed { .. }));
        assert_eq!(mapped.kind(), kind);
    }

    #[test]
    fn test_cosmosdb_error_conversion() {
        let cosmos_err = CosmosDbError::WriteFailed("conflict".to_string());
        let err: SummitError = cosmos_err.into();
        assert!(matches!(err, SummitError::CosmosDb(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "Address in use");
        let err: SummitError = io_err.into();
        assert!(matches!(err, SummitError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: SummitError = toml_err.into();
        assert!(matches!(err, SummitError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = SummitError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = StartupError::TimedOut {
            kind: ResourceKind::Bookings,
            seconds: 1,
        };
        let _: &dyn std::error::Error = &err;
    }
}
