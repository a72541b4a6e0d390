use crate::{open_store, AppState};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hl_core::classify::EVENT_HEADER;
use hl_core::pipeline::{ingest_with, WebhookDelivery};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const DELIVERY_HEADER: &str = "x-github-delivery";

const RECEIVED: &str = "Webhook received";
const RUNNING: &str = "Webhook receiver is running";
const DATABASE_NOT_INITIALIZED: &str = "Database not initialized";

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    fn received() -> Self {
        Self {
            message: RECEIVED.to_string(),
            error: None,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(root))
        .route("/webhook/", get(root))
        .route("/webhook/receiver", post(receiver))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/webhook/",
    responses((status = 200, body = WebhookAck))
)]
pub(crate) async fn root() -> Json<WebhookAck> {
    Json(WebhookAck {
        message: RUNNING.to_string(),
        error: None,
    })
}

/// Accepts any delivery. Unrecognized or unusable payloads are acknowledged and
/// dropped; only an unreachable store is reported as a failure.
#[utoipa::path(
    post,
    path = "/webhook/receiver",
    request_body(content = Object, content_type = "application/json"),
    params(
        ("X-GitHub-Event" = Option<String>, Header, description = "Event family, e.g. push or pull_request"),
        ("X-GitHub-Delivery" = Option<String>, Header, description = "Delivery id, logged only")
    ),
    responses(
        (status = 200, body = WebhookAck),
        (status = 500, body = WebhookAck, description = "Store unavailable")
    )
)]
pub(crate) async fn receiver(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload = parse_payload(&body);
    let delivery = WebhookDelivery::new(&payload)
        .with_event_header(header_str(&headers, EVENT_HEADER))
        .with_delivery_id(header_str(&headers, DELIVERY_HEADER));

    let outcome = ingest_with(|| open_store(&state), &delivery);
    if outcome.is_acknowledged() {
        return Json(WebhookAck::received()).into_response();
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(WebhookAck {
            message: RECEIVED.to_string(),
            error: Some(DATABASE_NOT_INITIALIZED.to_string()),
        }),
    )
        .into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// Reads the body as a JSON object. Anything else reads as an empty object so
/// classification can still decide from the header alone.
fn parse_payload(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!("webhook body is not a JSON object");
            Value::Object(Map::new())
        }
        Err(err) => {
            tracing::warn!(%err, "webhook body is not valid JSON");
            Value::Object(Map::new())
        }
    }
}
