//! Handler bodies shared by every resource kind
//!
//! The per-kind modules only carry the routes and their OpenAPI
//! annotations; the work happens here against [`ResourceService`].
//!
//! [`ResourceService`]: crate::services::ResourceService

use crate::domain::{Document, ResourceKind};
use crate::http::error::ApiError;
use crate::http::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

/// Unwrap a JSON body, turning extractor rejections into JSON errors
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub async fn upsert(
    state: &AppState,
    kind: ResourceKind,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Document>, ApiError> {
    let document = Document::from_value(json_body(payload)?)?;
    let saved = state.services.get(kind).upsert(document).await?;
    tracing::info!(kind = %kind, id = %saved.id, "Document stored");
    Ok(Json(saved))
}

pub async fn get(
    state: &AppState,
    kind: ResourceKind,
    id: String,
) -> Result<Json<Document>, ApiError> {
    match state.services.get(kind).get(&id).await? {
        Some(document) => Ok(Json(document)),
        None => Err(ApiError::NotFound { kind, id }),
    }
}

pub async fn delete(
    state: &AppState,
    kind: ResourceKind,
    id: String,
) -> Result<StatusCode, ApiError> {
    if state.services.get(kind).delete(&id).await? {
        tracing::info!(kind = %kind, id = %id, "Document deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { kind, id })
    }
}
