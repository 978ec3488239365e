pub mod notification;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use notification::{
    CreateNotification, DeleteNotification, LoadNotification, Notification, UpdateNotification,
    LOAD_FAILURE_MESSAGE,
};
pub use reducer::user_events_reducer;
pub use selectors::{select_user_event, select_user_events_array};
pub use state::EventsState;
