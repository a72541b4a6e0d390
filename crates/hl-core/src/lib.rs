pub mod classify;
pub mod display;
pub mod error;
pub mod events;
pub mod extract;
pub mod hooklog;
pub mod pipeline;
pub mod store;
pub mod time;

pub mod types;

pub use crate::error::HooklogError;
pub use crate::hooklog::Hooklog;
pub use crate::store::Store;
