//! API documentation
//!
//! Serves the generated OpenAPI document at [`OPENAPI_PATH`] and an
//! interactive explorer page that loads it. Both are unauthenticated.

use super::error::ErrorBody;
use super::routes::{bookings, health, projects, resources};
use super::state::AppState;
use crate::domain::Document;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Path of the generated OpenAPI document
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "BizzSummitAPI", version = "v1"),
    paths(
        bookings::upsert_booking,
        bookings::get_booking,
        bookings::delete_booking,
        projects::upsert_project,
        projects::get_project,
        projects::delete_project,
        resources::upsert_resource,
        resources::get_resource,
        resources::delete_resource,
        health::live,
        health::ready,
    ),
    components(schemas(Document, ErrorBody, health::HealthStatus)),
    modifiers(&SecurityAddon),
    tags(
        (name = "bookings", description = "Bookings"),
        (name = "projects", description = "Projects"),
        (name = "resources", description = "Resources"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "api_key_header",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Api-Key"))),
        );
    }
}

/// Documentation routes, the explorer mounted at `explorer_path`
pub fn router(explorer_path: &str) -> Router<AppState> {
    Router::new()
        .route(OPENAPI_PATH, get(openapi_json))
        .route(explorer_path, get(explorer))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn explorer() -> Html<String> {
    Html(explorer_page(OPENAPI_PATH))
}

fn explorer_page(spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>BizzSummitAPI v1</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##
    )
}
