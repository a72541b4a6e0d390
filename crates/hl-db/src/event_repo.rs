use crate::util::{decode_enum, encode_enum, from_rfc3339, to_rfc3339, DbError};
use chrono::Utc;
use hl_core::error::HooklogError;
use hl_core::events::EventRepository;
use hl_core::types::{CanonicalEvent, EventId, EventRecord};
use rusqlite::{params, Connection};

pub struct EventRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> EventRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for EventRepo<'_> {
    fn insert(&self, event: CanonicalEvent) -> Result<EventRecord, HooklogError> {
        let record = EventRecord {
            id: EventId::generate(),
            received_at: Utc::now(),
            event,
        };
        let sql = "INSERT INTO events (id, received_at, request_id, author, action, from_branch, to_branch, timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
        let action = encode_enum(&record.event.kind).map_err(store_error)?;
        self.conn
            .execute(
                sql,
                params![
                    record.id.as_str(),
                    to_rfc3339(&record.received_at),
                    record.event.correlation_id,
                    record.event.author,
                    action,
                    record.event.from_branch,
                    record.event.to_branch,
                    record.event.timestamp,
                ],
            )
            .map_err(store_error)?;
        Ok(record)
    }

    fn latest(&self, limit: u32) -> Result<Vec<EventRecord>, HooklogError> {
        let sql = "SELECT id, received_at, request_id, author, action, from_branch, to_branch, timestamp FROM events ORDER BY timestamp DESC, id DESC LIMIT ?1";
        let mut stmt = self.conn.prepare(sql).map_err(store_error)?;
        let mut rows = stmt.query(params![limit]).map_err(store_error)?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().map_err(store_error)? {
            events.push(map_event_row(row)?);
        }
        Ok(events)
    }
}

fn map_event_row(row: &rusqlite::Row<'_>) -> Result<EventRecord, HooklogError> {
    let id: String = row.get(0).map_err(store_error)?;
    let received_at: String = row.get(1).map_err(store_error)?;
    let action: String = row.get(4).map_err(store_error)?;

    Ok(EventRecord {
        id: EventId::new(id)
            .map_err(|err| DbError::InvalidId {
                message: err.to_string(),
            })
            .map_err(store_error)?,
        received_at: from_rfc3339(&received_at).map_err(store_error)?,
        event: CanonicalEvent {
            correlation_id: row.get(2).map_err(store_error)?,
            author: row.get(3).map_err(store_error)?,
            kind: decode_enum(&action).map_err(store_error)?,
            from_branch: row.get(5).map_err(store_error)?,
            to_branch: row.get(6).map_err(store_error)?,
            timestamp: row.get(7).map_err(store_error)?,
        },
    })
}

fn store_error(err: impl std::fmt::Display) -> HooklogError {
    HooklogError::store(err.to_string())
}
