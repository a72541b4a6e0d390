//! Decides which webhook family a delivery belongs to.

use crate::types::SourceKind;
use serde_json::Value;

/// Header carrying the platform's event name.
pub const EVENT_HEADER: &str = "x-github-event";

/// Classifies a delivery. A recognized header value wins; otherwise the payload
/// shape is sniffed, since replayed or hand-sent deliveries often lack the header.
pub fn classify(header: Option<&str>, payload: &Value) -> Option<SourceKind> {
    header
        .and_then(from_header)
        .or_else(|| from_payload_shape(payload))
}

pub fn from_header(value: &str) -> Option<SourceKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "push" => Some(SourceKind::Push),
        "pull_request" => Some(SourceKind::PullRequest),
        _ => None,
    }
}

pub fn from_payload_shape(payload: &Value) -> Option<SourceKind> {
    let object = payload.as_object()?;
    let present = |key: &str| object.get(key).is_some_and(|value| !value.is_null());
    if present("ref") && present("commits") {
        Some(SourceKind::Push)
    } else if object.get("pull_request").is_some_and(Value::is_object) {
        Some(SourceKind::PullRequest)
    } else {
        None
    }
}
