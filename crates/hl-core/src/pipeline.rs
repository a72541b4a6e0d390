//! Orchestrates one inbound delivery: classify, extract, store.
//!
//! ```text
//! Received -> Classified -> Extracted -> Stored
//!     \            \            \
//!      Unavailable  Ignored      Ignored / NotPersisted
//! ```
//!
//! Only `Unavailable` is reported to the sender as a failure. Everything else
//! is acknowledged so the platform never starts a retry storm over a transient
//! store problem or an event family this service does not track.

use crate::classify::classify;
use crate::error::HooklogError;
use crate::events::EventRepository;
use crate::extract::{extract, Extracted, SkipReason};
use crate::store::Store;
use crate::types::{CanonicalEvent, EventRecord};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct WebhookDelivery<'a> {
    pub event_header: Option<&'a str>,
    pub delivery_id: Option<&'a str>,
    pub payload: &'a Value,
}

impl<'a> WebhookDelivery<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self {
            event_header: None,
            delivery_id: None,
            payload,
        }
    }

    pub fn with_event_header(mut self, header: Option<&'a str>) -> Self {
        self.event_header = header;
        self
    }

    pub fn with_delivery_id(mut self, id: Option<&'a str>) -> Self {
        self.delivery_id = id;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Unclassified,
    Skipped(SkipReason),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassified => f.write_str("unclassified"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

#[derive(Debug)]
pub enum IngestOutcome {
    Stored(EventRecord),
    Ignored(IgnoreReason),
    /// Extraction succeeded but the insert failed.
    NotPersisted {
        event: CanonicalEvent,
        reason: String,
    },
    /// The store could not be opened, so nothing was attempted.
    Unavailable {
        reason: String,
    },
}

impl IngestOutcome {
    pub fn is_acknowledged(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }
}

/// Opens the store before anything else; failure short-circuits to `Unavailable`.
pub fn ingest_with<S, F>(open: F, delivery: &WebhookDelivery<'_>) -> IngestOutcome
where
    S: Store,
    F: FnOnce() -> Result<S, HooklogError>,
{
    match open() {
        Ok(store) => ingest(&store, delivery),
        Err(err) => {
            tracing::error!(%err, delivery = delivery.delivery_id, "store unavailable");
            IngestOutcome::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}

pub fn ingest<S: Store>(store: &S, delivery: &WebhookDelivery<'_>) -> IngestOutcome {
    let Some(kind) = classify(delivery.event_header, delivery.payload) else {
        tracing::info!(
            event = delivery.event_header.unwrap_or(""),
            delivery = delivery.delivery_id,
            "unrecognized webhook, not stored"
        );
        return IngestOutcome::Ignored(IgnoreReason::Unclassified);
    };

    let event = match extract(kind, delivery.payload) {
        Extracted::Event(event) => event,
        Extracted::Skipped(reason) => {
            tracing::debug!(%kind, %reason, delivery = delivery.delivery_id, "webhook skipped");
            return IngestOutcome::Ignored(IgnoreReason::Skipped(reason));
        }
    };

    match store.events().insert(event.clone()) {
        Ok(record) => {
            tracing::info!(
                id = %record.id,
                kind = %record.event.kind,
                correlation_id = %record.event.correlation_id,
                delivery = delivery.delivery_id,
                "event stored"
            );
            IngestOutcome::Stored(record)
        }
        Err(err) => {
            tracing::error!(
                %err,
                kind = %event.kind,
                correlation_id = %event.correlation_id,
                "failed to insert event"
            );
            IngestOutcome::NotPersisted {
                event,
                reason: err.to_string(),
            }
        }
    }
}
