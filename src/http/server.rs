//! Axum server setup
//!
//! Pipeline, outermost first:
//! - Request tracing
//! - HTTPS redirect
//! - Routing (unknown paths answer `404`)
//! - API key authorization on `/api` routes
//! - Handlers, health probes and documentation

use super::docs;
use super::middleware::{enforce_https, ApiKeyAuth, HttpsPolicy};
use super::routes;
use super::state::AppState;
use crate::config::SummitConfig;
use crate::domain::{Result, SummitError};
use axum::middleware::from_fn_with_state;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Build the request pipeline
pub fn build_router(config: &SummitConfig, state: AppState) -> Router {
    let auth = ApiKeyAuth::from_config(&config.auth);
    if !config.auth.enabled {
        tracing::warn!("API key authorization disabled - /api routes are open");
    }

    let mut app = Router::new()
        .merge(routes::api_router(auth))
        .merge(routes::health::router());

    if config.server.docs_enabled {
        let explorer_path = config.server.explorer_path();
        tracing::info!(
            openapi = docs::OPENAPI_PATH,
            explorer = %explorer_path,
            "API documentation enabled"
        );
        app = app.merge(docs::router(&explorer_path));
    }

    app.layer(from_fn_with_state(
        HttpsPolicy::from_config(&config.server),
        enforce_https,
    ))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Bind the listener
///
/// # Errors
///
/// Returns [`SummitError::Server`] when the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| SummitError::Server(format!("Failed to bind {addr}: {e}")))
}

/// Serve until `shutdown` completes
///
/// Readiness is set once serving starts and cleared as soon as `shutdown`
/// fires, before in-flight requests drain.
///
/// # Errors
///
/// Returns [`SummitError::Server`] when the server fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    state: &AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .map_err(|e| SummitError::Server(format!("Failed to read local address: {e}")))?;

    let readiness = state.readiness.clone();
    readiness.mark_ready();
    tracing::info!(addr = %local_addr, "Server listening");

    let drain = readiness.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            drain.mark_not_ready();
            tracing::info!("Shutdown requested, draining connections");
        })
        .await
        .map_err(|e| SummitError::Server(format!("Server error: {e}")))?;

    readiness.mark_not_ready();
    tracing::info!("Server shutdown complete");
    Ok(())
}
