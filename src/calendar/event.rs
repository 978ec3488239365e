use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub type EventId = i64;

pub const DEFAULT_TITLE: &str = "No name";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date_start: String,
    pub date_end: String,
}

/// An event as posted to the server, before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date_start: String,
    pub date_end: String,
}

impl Event {
    pub fn start(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_start)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_end)
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        Some((self.end()? - self.start()?).num_minutes())
    }
}

impl NewEvent {
    /// Placeholder event spanning from `date_start` until now.
    pub fn untitled_until_now(date_start: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date_start: date_start.into(),
            date_end: format_timestamp(Utc::now()),
        }
    }
}

/// Returns the event with its new title, or `None` if nothing changed.
pub fn retitle(event: &Event, title: &str) -> Option<Event> {
    if event.title == title {
        return None;
    }
    Some(Event {
        title: title.to_string(),
        ..event.clone()
    })
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
