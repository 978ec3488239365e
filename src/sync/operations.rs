use crate::app::Dispatch;
use crate::calendar::{Event, EventId, NewEvent};
use crate::recorder::StartTimeSource;
use crate::store::{
    CreateNotification, DeleteNotification, LoadNotification, Notification, UpdateNotification,
    LOAD_FAILURE_MESSAGE,
};
use crate::sync::events_api::EventsApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded,
    Failed,
}

/// Runs each remote call as request → success | failure notifications.
///
/// Errors never leave this type; they are logged and collapsed into the
/// failure notification of the operation.
pub struct EventOperations<A> {
    api: A,
}

impl<A: EventsApi> EventOperations<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn load_user_events(&self, dispatch: &impl Dispatch) -> OperationOutcome {
        dispatch.dispatch(Notification::Load(LoadNotification::Requested).into());

        match self.api.list_events().await {
            Ok(events) => {
                dispatch.dispatch(Notification::Load(LoadNotification::Succeeded(events)).into());
                OperationOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Loading events failed: {}", e);
                dispatch.dispatch(
                    Notification::Load(LoadNotification::Failed(LOAD_FAILURE_MESSAGE.to_string()))
                        .into(),
                );
                OperationOutcome::Failed
            }
        }
    }

    pub async fn create_user_event(
        &self,
        dispatch: &impl Dispatch,
        start: &impl StartTimeSource,
    ) -> OperationOutcome {
        dispatch.dispatch(Notification::Create(CreateNotification::Requested).into());

        let new_event = NewEvent::untitled_until_now(start.date_start());
        match self.api.create_event(&new_event).await {
            Ok(created) => {
                dispatch.dispatch(Notification::Create(CreateNotification::Succeeded(created)).into());
                OperationOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Creating event failed: {}", e);
                dispatch.dispatch(Notification::Create(CreateNotification::Failed).into());
                OperationOutcome::Failed
            }
        }
    }

    pub async fn update_user_event(&self, dispatch: &impl Dispatch, event: &Event) -> OperationOutcome {
        dispatch.dispatch(Notification::Update(UpdateNotification::Requested).into());

        match self.api.update_event(event).await {
            Ok(updated) => {
                dispatch.dispatch(Notification::Update(UpdateNotification::Succeeded(updated)).into());
                OperationOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Updating event {} failed: {}", event.id, e);
                dispatch.dispatch(Notification::Update(UpdateNotification::Failed).into());
                OperationOutcome::Failed
            }
        }
    }

    pub async fn delete_user_event(&self, dispatch: &impl Dispatch, id: EventId) -> OperationOutcome {
        dispatch.dispatch(Notification::Delete(DeleteNotification::Requested).into());

        match self.api.delete_event(id).await {
            Ok(()) => {
                dispatch.dispatch(Notification::Delete(DeleteNotification::Succeeded(id)).into());
                OperationOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Deleting event {} failed: {}", id, e);
                dispatch.dispatch(Notification::Delete(DeleteNotification::Failed).into());
                OperationOutcome::Failed
            }
        }
    }
}
