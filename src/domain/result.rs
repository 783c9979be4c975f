//! Result type alias for BizzSummit
//!
//! This module provides a convenient Result type alias that uses SummitError
//! as the error type.

use super::errors::SummitError;

/// Result type alias for BizzSummit operations
///
/// # Examples
///
/// ```
/// use bizzsummit::domain::result::Result;
/// use bizzsummit::domain::errors::SummitError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SummitError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SummitError>;
