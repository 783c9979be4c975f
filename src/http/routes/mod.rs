//! HTTP routes
//!
//! - [`health`] - Liveness and readiness, unauthenticated
//! - [`bookings`], [`projects`], [`resources`] - Document endpoints under `/api`

/// Router and documented handlers for one resource kind
///
/// Expands to `router()` plus the upsert, get and delete handlers. Paths,
/// tag and summaries are passed as literals so `#[utoipa::path]` can read
/// them.
macro_rules! resource_routes {
    (
        kind: $kind:expr,
        tag: $tag:tt,
        collection: $collection:tt,
        item: $item:tt,
        upsert: $upsert:ident => $upsert_doc:tt,
        get: $get:ident => $get_doc:tt,
        delete: $delete:ident => $delete_doc:tt $(,)?
    ) => {
        use $crate::domain::Document;
        use $crate::http::error::{ApiError, ErrorBody};
        use $crate::http::routes::common;
        use $crate::http::state::AppState;
        use axum::extract::rejection::JsonRejection;
        use axum::extract::{Path, State};
        use axum::http::StatusCode;
        use axum::routing::{get, post};
        use axum::{Json, Router};
        use serde_json::Value;

        pub fn router() -> Router<AppState> {
            Router::new()
                .route($collection, post($upsert))
                .route($item, get($get).delete($delete))
        }

        #[doc = $upsert_doc]
        ///
        /// A missing `id` is generated.
        #[utoipa::path(
            post,
            path = $collection,
            tag = $tag,
            request_body = Document,
            responses(
                (status = 200, description = "Document stored", body = Document),
                (status = 400, description = "Invalid document", body = ErrorBody),
                (status = 401, description = "Missing or invalid API key", body = ErrorBody)
            ),
            security(("api_key" = []), ("api_key_header" = []))
        )]
        pub async fn $upsert(
            State(state): State<AppState>,
            payload: Result<Json<Value>, JsonRejection>,
        ) -> Result<Json<Document>, ApiError> {
            common::upsert(&state, $kind, payload).await
        }

        #[doc = $get_doc]
        #[utoipa::path(
            get,
            path = $item,
            tag = $tag,
            params(("id" = String, Path, description = "Document id")),
            responses(
                (status = 200, description = "Document found", body = Document),
                (status = 401, description = "Missing or invalid API key", body = ErrorBody),
                (status = 404, description = "Document not found", body = ErrorBody)
            ),
            security(("api_key" = []), ("api_key_header" = []))
        )]
        pub async fn $get(
            State(state): State<AppState>,
            Path(id): Path<String>,
        ) -> Result<Json<Document>, ApiError> {
            common::get(&state, $kind, id).await
        }

        #[doc = $delete_doc]
        #[utoipa::path(
            delete,
            path = $item,
            tag = $tag,
            params(("id" = String, Path, description = "Document id")),
            responses(
                (status = 204, description = "Document deleted"),
                (status = 401, description = "Missing or invalid API key", body = ErrorBody),
                (status = 404, description = "Document not found", body = ErrorBody)
            ),
            security(("api_key" = []), ("api_key_header" = []))
        )]
        pub async fn $delete(
            State(state): State<AppState>,
            Path(id): Path<String>,
        ) -> Result<StatusCode, ApiError> {
            common::delete(&state, $kind, id).await
        }
    };
}

pub mod bookings;
pub mod common;
pub mod health;
pub mod projects;
pub mod resources;

use super::middleware::{require_api_key, ApiKeyAuth};
use super::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::Router;

/// `/api` routes behind API key authorization
///
/// The check is a route layer: unknown paths fall through to `404`
/// without it, matched paths hit it before their handler.
pub fn api_router(auth: ApiKeyAuth) -> Router<AppState> {
    Router::new()
        .merge(bookings::router())
        .merge(projects::router())
        .merge(resources::router())
        .route_layer(from_fn_with_state(auth, require_api_key))
}
