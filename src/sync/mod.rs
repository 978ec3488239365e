pub mod events_api;
pub mod operations;

pub use events_api::{ApiError, EventsApi, HttpEventsClient, DEFAULT_BASE_URL};
pub use operations::{EventOperations, OperationOutcome};
