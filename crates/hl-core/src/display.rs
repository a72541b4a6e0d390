use crate::time::to_display;
use crate::types::{CanonicalEvent, EventKind, EventRecord, EventView};

/// One-line sentence describing an event.
pub fn format_event(event: &CanonicalEvent) -> String {
    let when = to_display(&event.timestamp);
    match event.kind {
        EventKind::Push => format!("{} pushed to {} on {when}", event.author, event.to_branch),
        EventKind::PullRequest => format!(
            "{} submitted a pull request from {} to {} on {when}",
            event.author, event.from_branch, event.to_branch
        ),
        EventKind::Merge => format!(
            "{} merged branch {} to {} on {when}",
            event.author, event.from_branch, event.to_branch
        ),
    }
}

pub fn view(record: &EventRecord) -> EventView {
    let event = &record.event;
    EventView {
        id: record.id.to_string(),
        request_id: event.correlation_id.clone(),
        author: event.author.clone(),
        action: event.kind,
        from_branch: event.from_branch.clone(),
        to_branch: event.to_branch.clone(),
        timestamp: event.timestamp.clone(),
        formatted_timestamp: to_display(&event.timestamp),
        display_message: format_event(event),
    }
}
