use crate::calendar::{Event, EventId};

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load events";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadNotification {
    Requested,
    Succeeded(Vec<Event>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateNotification {
    Requested,
    Succeeded(Event),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateNotification {
    Requested,
    Succeeded(Event),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteNotification {
    Requested,
    Succeeded(EventId),
    Failed,
}

/// Lifecycle signal emitted by an event operation, one family per operation kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Load(LoadNotification),
    Create(CreateNotification),
    Update(UpdateNotification),
    Delete(DeleteNotification),
}

impl Notification {
    pub fn action_type(&self) -> &'static str {
        match self {
            Notification::Load(LoadNotification::Requested) => "userEvents/load_request",
            Notification::Load(LoadNotification::Succeeded(_)) => "userEvents/load_success",
            Notification::Load(LoadNotification::Failed(_)) => "userEvents/load_failure",
            Notification::Create(CreateNotification::Requested) => "userEvents/create_request",
            Notification::Create(CreateNotification::Succeeded(_)) => "userEvents/create_success",
            Notification::Create(CreateNotification::Failed) => "userEvents/create_failure",
            Notification::Update(UpdateNotification::Requested) => "userEvents/update_request",
            Notification::Update(UpdateNotification::Succeeded(_)) => "userEvents/update_success",
            Notification::Update(UpdateNotification::Failed) => "userEvents/update_failure",
            Notification::Delete(DeleteNotification::Requested) => "userEvents/delete_request",
            Notification::Delete(DeleteNotification::Succeeded(_)) => "userEvents/delete_success",
            Notification::Delete(DeleteNotification::Failed) => "userEvents/delete_failure",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Notification::Load(LoadNotification::Failed(_))
                | Notification::Create(CreateNotification::Failed)
                | Notification::Update(UpdateNotification::Failed)
                | Notification::Delete(DeleteNotification::Failed)
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Notification::Load(LoadNotification::Failed(message)) => Some(message),
            _ => None,
        }
    }
}
