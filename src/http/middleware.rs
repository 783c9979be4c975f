//! Request middleware
//!
//! - [`enforce_https`] - Redirects plain HTTP requests to HTTPS
//! - [`require_api_key`] - Rejects `/api` requests without a known API key

use super::error::ApiError;
use crate::config::{AuthConfig, ServerConfig};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Header carrying an API key as an alternative to `Authorization: Bearer`
pub const API_KEY_HEADER: &str = "x-api-key";

const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// HTTPS redirect settings
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpsPolicy {
    pub enabled: bool,
    pub port: Option<u16>,
}

impl HttpsPolicy {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            enabled: config.https_redirect,
            port: config.https_port,
        }
    }
}

/// Redirect requests that did not arrive over HTTPS
///
/// The original scheme is taken from the request URI or, behind a
/// TLS-terminating proxy, from `X-Forwarded-Proto`. Answers
/// `307 Temporary Redirect` so the method and body are preserved, and
/// `400` when there is no `Host` to redirect to.
pub async fn enforce_https(
    State(policy): State<HttpsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if !policy.enabled || is_https(&request) {
        return next.run(request).await;
    }

    let Some(host) = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
    else {
        return ApiError::bad_request("cannot redirect to HTTPS without a Host header")
            .into_response();
    };

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = https_location(host, policy.port, path_and_query);

    tracing::debug!(location = %location, "Redirecting to HTTPS");
    (
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
    )
        .into_response()
}

fn is_https(request: &Request) -> bool {
    if request.uri().scheme_str() == Some("https") {
        return true;
    }

    request
        .headers()
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

/// Host without its port, IPv6 literals keep their brackets
fn host_without_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

fn https_location(host: &str, port: Option<u16>, path_and_query: &str) -> String {
    let host = host_without_port(host);
    match port {
        Some(port) if port != 443 => format!("https://{host}:{port}{path_and_query}"),
        _ => format!("https://{host}{path_and_query}"),
    }
}

/// Accepted API keys, stored as SHA-256 digests
#[derive(Clone)]
pub struct ApiKeyAuth {
    enabled: bool,
    digests: Arc<Vec<[u8; 32]>>,
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("enabled", &self.enabled)
            .field("keys", &self.digests.len())
            .finish()
    }
}

impl ApiKeyAuth {
    pub fn from_config(config: &AuthConfig) -> Self {
        let digests = config
            .api_keys
            .iter()
            .filter(|key| !key.expose_secret().is_blank())
            .map(|key| digest(key.expose_secret().as_str()))
            .collect();

        Self {
            enabled: config.enabled,
            digests: Arc::new(digests),
        }
    }

    /// Check a presented key
    pub fn accepts(&self, presented: &str) -> bool {
        let presented = digest(presented);
        self.digests
            .iter()
            .fold(false, |found, known| found | digests_equal(known, &presented))
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Key presented as `Authorization: Bearer <key>` or `X-Api-Key: <key>`
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|key| !key.is_empty())
    })
}

/// Reject requests without an accepted API key
///
/// Installed as a route layer, so it only runs for matched `/api` routes
/// and always before the handler.
pub async fn require_api_key(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !auth.enabled {
        return Ok(next.run(request).await);
    }

    match presented_key(request.headers()) {
        Some(key) if auth.accepts(key) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected unknown API key");
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Missing API key");
            Err(ApiError::Unauthorized)
        }
    }
}
