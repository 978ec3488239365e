pub mod event;

pub use event::{Event, EventId, NewEvent, retitle, DEFAULT_TITLE};
