use crate::error::HooklogError;
use crate::types::{CanonicalEvent, EventRecord};

/// Append-only event persistence.
pub trait EventRepository {
    /// Persists one event as a single write and returns it with its store-assigned id.
    fn insert(&self, event: CanonicalEvent) -> Result<EventRecord, HooklogError>;

    /// Returns at most `limit` events ordered by `timestamp` descending.
    fn latest(&self, limit: u32) -> Result<Vec<EventRecord>, HooklogError>;
}

/// Upper bound on how many events a read returns.
pub const LATEST_LIMIT: u32 = 50;
