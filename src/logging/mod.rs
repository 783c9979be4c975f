//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Text or JSON console output
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use bizzsummit::logging::init_logging;
//! use bizzsummit::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of provisioning one resource kind
///
/// # Example
///
/// ```no_run
/// use bizzsummit::log_provision_outcome;
/// use bizzsummit::domain::ResourceKind;
///
/// log_provision_outcome!(ResourceKind::Bookings, "BizzSummit", "Bookings", true, 1);
/// ```
#[macro_export]
macro_rules! log_provision_outcome {
    ($kind:expr, $database:expr, $container:expr, $created:expr, $attempts:expr) => {{
        tracing::info!(
            kind = %$kind,
            database = %$database,
            container = %$container,
            created = $created,
            attempts = $attempts,
            "Resource kind provisioned"
        )
    }};
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use bizzsummit::log_error_with_context;
/// use bizzsummit::domain::SummitError;
///
/// let error = SummitError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {{
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        )
    }};
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use bizzsummit::log_retry_attempt;
///
/// log_retry_attempt!(2, 2, "Connection refused");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {{
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        )
    }};
}
