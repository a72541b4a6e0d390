use crate::display::view;
use crate::error::HooklogError;
use crate::events::{EventRepository, LATEST_LIMIT};
use crate::store::Store;
use crate::types::{EventFeed, EventRecord};

pub struct Hooklog<S: Store> {
    store: S,
}

impl<S: Store> Hooklog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn events(&self) -> EventsApi<'_, S> {
        EventsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct EventsApi<'a, S: Store> {
    core: &'a Hooklog<S>,
}

impl<S: Store> EventsApi<'_, S> {
    /// Most recent events, newest first. `limit` is clamped to [`LATEST_LIMIT`].
    pub fn latest(&self, limit: Option<u32>) -> Result<Vec<EventRecord>, HooklogError> {
        let limit = limit.unwrap_or(LATEST_LIMIT).min(LATEST_LIMIT);
        self.core.store.events().latest(limit)
    }

    pub fn feed(&self) -> Result<EventFeed, HooklogError> {
        let events = self.latest(None)?.iter().map(view).collect();
        Ok(EventFeed { events })
    }
}
