pub mod enums;
pub mod event;
pub mod ids;
pub mod payload;

pub use enums::{EventKind, SourceKind};
pub use event::{CanonicalEvent, EventFeed, EventRecord, EventView, UNKNOWN_AUTHOR};
pub use ids::{EventId, IdError};
