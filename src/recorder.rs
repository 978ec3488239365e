use chrono::{DateTime, Utc};

use crate::calendar::event::format_timestamp;

/// Source of the start time used when a new event is created.
pub trait StartTimeSource {
    fn date_start(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecorderNotification {
    Start(DateTime<Utc>),
    Stop,
}

impl RecorderNotification {
    pub fn start_now() -> Self {
        RecorderNotification::Start(Utc::now())
    }

    pub fn action_type(&self) -> &'static str {
        match self {
            RecorderNotification::Start(_) => "recorder/start",
            RecorderNotification::Stop => "recorder/stop",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecorderState {
    pub date_start: Option<String>,
}

pub fn recorder_reducer(state: RecorderState, notification: RecorderNotification) -> RecorderState {
    match notification {
        RecorderNotification::Start(at) => RecorderState {
            date_start: Some(format_timestamp(at)),
        },
        RecorderNotification::Stop => RecorderState { date_start: None },
    }
}

/// Start timestamp of the running recording, empty when idle.
pub fn select_date_start(state: &RecorderState) -> String {
    state.date_start.clone().unwrap_or_default()
}

pub fn select_is_recording(state: &RecorderState) -> bool {
    state.date_start.is_some()
}

impl StartTimeSource for RecorderState {
    fn date_start(&self) -> String {
        select_date_start(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn idle_recorder_has_empty_start() {
        let state = RecorderState::default();

        assert_eq!(select_date_start(&state), "");
        assert!(!select_is_recording(&state));
    }

    #[test]
    fn start_records_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();

        let state = recorder_reducer(RecorderState::default(), RecorderNotification::Start(at));

        assert_eq!(state.date_start(), "2025-01-15T09:30:00.000Z");
        assert!(select_is_recording(&state));
    }

    #[test]
    fn stop_clears_start() {
        let state = recorder_reducer(RecorderState::default(), RecorderNotification::start_now());

        let state = recorder_reducer(state, RecorderNotification::Stop);

        assert!(!select_is_recording(&state));
    }
}
