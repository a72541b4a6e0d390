use crate::types::enums::EventKind;
use crate::types::ids::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Normalized form of every accepted webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalEvent {
    /// Head commit id for pushes, pull request number otherwise.
    #[serde(rename = "request_id")]
    pub correlation_id: String,
    pub author: String,
    #[serde(rename = "action")]
    pub kind: EventKind,
    /// Always empty for pushes.
    pub from_branch: String,
    pub to_branch: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`, empty, or the raw value when it could not be parsed.
    pub timestamp: String,
}

/// A canonical event as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRecord {
    pub id: EventId,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: CanonicalEvent,
}

/// Read-model item served by `GET /api/events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventView {
    pub id: String,
    pub request_id: String,
    pub author: String,
    pub action: EventKind,
    pub from_branch: String,
    pub to_branch: String,
    pub timestamp: String,
    pub formatted_timestamp: String,
    pub display_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventFeed {
    pub events: Vec<EventView>,
}
