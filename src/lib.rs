pub mod app;
pub mod calendar;
pub mod recorder;
pub mod storage;
pub mod store;
pub mod sync;

pub use app::{Action, Dispatch, Dispatcher, RootState, Store};
pub use calendar::{Event, EventId, NewEvent};
pub use store::{EventsState, Notification};
