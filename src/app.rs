use tokio::sync::mpsc;

use crate::calendar::Event;
use crate::recorder::{recorder_reducer, RecorderNotification, RecorderState};
use crate::store::{select_user_events_array, user_events_reducer, EventsState, Notification};

/// Everything the application store can apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UserEvents(Notification),
    Recorder(RecorderNotification),
}

impl Action {
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::UserEvents(notification) => notification.action_type(),
            Action::Recorder(notification) => notification.action_type(),
        }
    }
}

impl From<Notification> for Action {
    fn from(notification: Notification) -> Self {
        Action::UserEvents(notification)
    }
}

impl From<RecorderNotification> for Action {
    fn from(notification: RecorderNotification) -> Self {
        Action::Recorder(notification)
    }
}

/// Sink that operations emit their notifications into.
pub trait Dispatch {
    fn dispatch(&self, action: Action);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub user_events: EventsState,
    pub recorder: RecorderState,
}

pub fn root_reducer(state: RootState, action: Action) -> RootState {
    match action {
        Action::UserEvents(notification) => RootState {
            user_events: user_events_reducer(state.user_events, notification),
            ..state
        },
        Action::Recorder(notification) => RootState {
            recorder: recorder_reducer(state.recorder, notification),
            ..state
        },
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: mpsc::UnboundedSender<Action>,
}

impl Dispatch for Dispatcher {
    fn dispatch(&self, action: Action) {
        if self.sender.send(action).is_err() {
            tracing::warn!("Store is gone, dropping action");
        }
    }
}

/// Owns the root state and applies actions in the order they were dispatched.
pub struct Store {
    state: RootState,
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(RootState::default())
    }

    pub fn with_state(state: RootState) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            sender: self.sender.clone(),
        }
    }

    pub fn apply(&mut self, action: Action) {
        log_action(&action);
        let state = std::mem::take(&mut self.state);
        self.state = root_reducer(state, action);
    }

    /// Applies every action already queued and returns how many there were.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.receiver.try_recv() {
            self.apply(action);
            applied += 1;
        }
        applied
    }

    /// Applies actions until every outstanding `Dispatcher` has been dropped.
    pub async fn run_until_idle(self) -> RootState {
        let Store {
            mut state,
            sender,
            mut receiver,
        } = self;
        drop(sender);

        while let Some(action) = receiver.recv().await {
            log_action(&action);
            state = root_reducer(state, action);
        }
        state
    }

    pub fn events(&self) -> Vec<&Event> {
        select_user_events_array(&self.state.user_events)
    }
}

fn log_action(action: &Action) {
    match action {
        Action::UserEvents(notification) if notification.is_failure() => match notification.error_message() {
            Some(message) => tracing::warn!("{}: {}", notification.action_type(), message),
            None => tracing::warn!("{}", notification.action_type()),
        },
        _ => tracing::debug!("{}", action.action_type()),
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
