use utoipa::OpenApi;

use crate::routes::error::ErrorBody;
use crate::routes::webhook::WebhookAck;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use hl_core::types::{EventFeed, EventKind, EventView};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::webhook::root,
        crate::routes::webhook::receiver,
        crate::routes::events::list_events,
    ),
    components(schemas(EventFeed, EventView, EventKind, WebhookAck, ErrorBody))
)]
struct ApiDoc;

pub fn generate_spec() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

pub fn router() -> Router {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_document_lists_every_route() {
        let doc: serde_json::Value = serde_json::from_str(&generate_spec().unwrap()).unwrap();
        for path in ["/webhook/", "/webhook/receiver", "/api/events"] {
            assert!(doc["paths"][path].is_object(), "missing {path}");
        }
        assert!(doc["components"]["schemas"]["EventView"].is_object());
    }
}
