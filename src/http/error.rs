//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use crate::domain::{ResourceKind, SummitError};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400)
    BadRequest { message: String },

    /// Missing or unknown API key (401)
    Unauthorized,

    /// Document not found (404)
    NotFound { kind: ResourceKind, id: String },

    /// Store or internal failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            Self::BadRequest { message } => ("bad_request", message.clone()),
            Self::Unauthorized => ("unauthorized", "missing or invalid API key".to_string()),
            Self::NotFound { kind, id } => ("not_found", format!("{kind} document '{id}' not found")),
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!(error = %message, "Internal error");
                ("internal_error", "an internal error occurred".to_string())
            }
        };
        ErrorBody {
            error: error.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(self.body());

        if matches!(self, Self::Unauthorized) {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<SummitError> for ApiError {
    fn from(err: SummitError) -> Self {
        match err {
            SummitError::Validation(message) => Self::BadRequest { message },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
