use std::cell::Cell;

use chrono::{DateTime, Local, Utc};

use user_events::{
    app::{Action, Dispatch, Dispatcher, Store},
    calendar::{retitle, Event, EventId},
    recorder::RecorderNotification,
    storage::config::Config,
    store::{select_user_event, CreateNotification, EventsState, Notification},
    sync::{EventOperations, HttpEventsClient, OperationOutcome},
};

pub const USAGE: &str = "Usage: user-events [--base-url URL] <list | new [--start ISO8601] | rename ID TITLE | delete ID>";

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    List,
    New { start: Option<DateTime<Utc>> },
    Rename { id: EventId, title: String },
    Delete { id: EventId },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub base_url: Option<String>,
    pub command: CliCommand,
}

pub fn parse_cli_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut base_url = None;
    let mut positional = Vec::new();
    let mut start = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                return Ok(Invocation {
                    base_url,
                    command: CliCommand::Help,
                });
            }
            "--base-url" => {
                let url = args.next().ok_or("--base-url requires a value")?;
                base_url = Some(url);
            }
            "--start" => {
                let value = args.next().ok_or("--start requires a timestamp")?;
                let parsed = DateTime::parse_from_rfc3339(&value)
                    .map_err(|_| format!("Invalid timestamp '{}'. Use ISO 8601.", value))?;
                start = Some(parsed.with_timezone(&Utc));
            }
            other if other.starts_with("--") => return Err(format!("Unknown argument: {}", other)),
            _ => positional.push(arg),
        }
    }

    let command = match positional.first().map(String::as_str) {
        None | Some("list") => CliCommand::List,
        Some("new") => CliCommand::New { start },
        Some("rename") => {
            let id = parse_id(positional.get(1))?;
            if positional.len() < 3 {
                return Err("rename requires a title".to_string());
            }
            CliCommand::Rename {
                id,
                title: positional[2..].join(" "),
            }
        }
        Some("delete") => CliCommand::Delete {
            id: parse_id(positional.get(1))?,
        },
        Some(other) => return Err(format!("Unknown command: {}", other)),
    };

    if start.is_some() && !matches!(command, CliCommand::New { .. }) {
        return Err("--start only applies to new".to_string());
    }

    Ok(Invocation { base_url, command })
}

fn parse_id(value: Option<&String>) -> Result<EventId, String> {
    let value = value.ok_or("an event id is required")?;
    value
        .parse()
        .map_err(|_| format!("Invalid event id: {}", value))
}

pub async fn run(command: CliCommand, config: &Config) -> anyhow::Result<()> {
    let client = HttpEventsClient::from_config(&config.api)?;
    let operations = EventOperations::new(client);
    let mut store = Store::new();
    let dispatcher = store.dispatcher();

    match command {
        CliCommand::Help => {
            println!("{}", USAGE);
        }
        CliCommand::List => {
            let outcome = operations.load_user_events(&dispatcher).await;
            store.drain();
            ensure_succeeded(outcome, "Failed to load events")?;
            warn_on_inconsistency(&store.state().user_events);
            println!("{}", format_event_list(&store.events()));
        }
        CliCommand::New { start } => {
            let started = start
                .map(RecorderNotification::Start)
                .unwrap_or_else(RecorderNotification::start_now);
            store.apply(started.into());

            let tracking = CreatedIdTracker::new(&dispatcher);
            let outcome = operations
                .create_user_event(&tracking, &store.state().recorder)
                .await;
            dispatcher.dispatch(RecorderNotification::Stop.into());
            store.drain();
            ensure_succeeded(outcome, "Failed to create event")?;

            let created = tracking
                .created_id()
                .and_then(|id| select_user_event(&store.state().user_events, id));
            if let Some(created) = created {
                println!("Created {}", format_event_line(created));
            }
        }
        CliCommand::Rename { id, title } => {
            let outcome = operations.load_user_events(&dispatcher).await;
            store.drain();
            ensure_succeeded(outcome, "Failed to load events")?;

            let event = select_user_event(&store.state().user_events, id)
                .ok_or_else(|| anyhow::anyhow!("No event with id {}", id))?;
            let Some(renamed) = retitle(event, &title) else {
                println!("Title unchanged");
                return Ok(());
            };

            let outcome = operations.update_user_event(&dispatcher, &renamed).await;
            store.drain();
            ensure_succeeded(outcome, "Failed to update event")?;
            warn_on_inconsistency(&store.state().user_events);
            if let Some(updated) = select_user_event(&store.state().user_events, id) {
                println!("Updated {}", format_event_line(updated));
            }
        }
        CliCommand::Delete { id } => {
            let outcome = operations.delete_user_event(&dispatcher, id).await;
            store.drain();
            ensure_succeeded(outcome, "Failed to delete event")?;
            println!("Deleted event {}", id);
        }
    }

    Ok(())
}

/// Forwards to the store while remembering the id of a created event.
struct CreatedIdTracker<'a> {
    inner: &'a Dispatcher,
    created: Cell<Option<EventId>>,
}

impl<'a> CreatedIdTracker<'a> {
    fn new(inner: &'a Dispatcher) -> Self {
        Self {
            inner,
            created: Cell::new(None),
        }
    }

    fn created_id(&self) -> Option<EventId> {
        self.created.get()
    }
}

impl Dispatch for CreatedIdTracker<'_> {
    fn dispatch(&self, action: Action) {
        if let Action::UserEvents(Notification::Create(CreateNotification::Succeeded(event))) = &action {
            self.created.set(Some(event.id));
        }
        self.inner.dispatch(action);
    }
}

fn warn_on_inconsistency(state: &EventsState) {
    if !state.is_consistent() {
        tracing::warn!("Events without a list position: {:?}", state.orphaned_ids());
    }
}

fn ensure_succeeded(outcome: OperationOutcome, message: &str) -> anyhow::Result<()> {
    match outcome {
        OperationOutcome::Succeeded => Ok(()),
        OperationOutcome::Failed => anyhow::bail!("{}", message),
    }
}

fn format_event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "No events.".to_string();
    }

    events
        .iter()
        .map(|event| format!("- {}", format_event_line(event)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_event_line(event: &Event) -> String {
    let time_label = match (event.start(), event.end()) {
        (Some(start), Some(end)) => format!(
            "{}-{}",
            start.with_timezone(&Local).format("%H:%M"),
            end.with_timezone(&Local).format("%H:%M")
        ),
        _ => "--:--".to_string(),
    };
    match event.duration_minutes() {
        Some(minutes) => format!("#{:<5} {:<11} {} ({} min)", event.id, time_label, event.title, minutes),
        None => format!("#{:<5} {:<11} {}", event.id, time_label, event.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_lists_events() {
        let invocation = parse_cli_args(args(&[])).unwrap();
        assert_eq!(invocation.command, CliCommand::List);
        assert_eq!(invocation.base_url, None);
    }

    #[test]
    fn base_url_is_captured() {
        let invocation = parse_cli_args(args(&["--base-url", "http://x:1", "list"])).unwrap();
        assert_eq!(invocation.base_url.as_deref(), Some("http://x:1"));
    }

    #[test]
    fn rename_joins_title_words() {
        let invocation = parse_cli_args(args(&["rename", "4", "Team", "lunch"])).unwrap();
        assert_eq!(
            invocation.command,
            CliCommand::Rename {
                id: 4,
                title: "Team lunch".to_string()
            }
        );
    }

    #[test]
    fn rename_without_title_is_rejected() {
        assert!(parse_cli_args(args(&["rename", "4"])).is_err());
    }

    #[test]
    fn delete_requires_numeric_id() {
        assert!(parse_cli_args(args(&["delete", "abc"])).is_err());
        assert_eq!(
            parse_cli_args(args(&["delete", "9"])).unwrap().command,
            CliCommand::Delete { id: 9 }
        );
    }

    #[test]
    fn new_accepts_start_timestamp() {
        let invocation = parse_cli_args(args(&["new", "--start", "2025-01-15T09:00:00Z"])).unwrap();
        match invocation.command {
            CliCommand::New { start: Some(start) } => {
                assert_eq!(start.to_rfc3339(), "2025-01-15T09:00:00+00:00")
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn start_outside_new_is_rejected() {
        assert!(parse_cli_args(args(&["list", "--start", "2025-01-15T09:00:00Z"])).is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_cli_args(args(&["sync"])).is_err());
    }

    #[test]
    fn event_line_includes_id_and_title() {
        let event = Event {
            id: 3,
            title: "Dentist".to_string(),
            date_start: "not a date".to_string(),
            date_end: "2025-01-15T10:00:00.000Z".to_string(),
        };

        let line = format_event_line(&event);

        assert!(line.starts_with("#3"));
        assert!(line.ends_with("Dentist"));
    }

    #[test]
    fn event_line_shows_duration_when_timestamps_parse() {
        let event = Event {
            id: 5,
            title: "Review".to_string(),
            date_start: "2025-01-15T09:00:00.000Z".to_string(),
            date_end: "2025-01-15T09:45:00.000Z".to_string(),
        };

        assert!(format_event_line(&event).ends_with("Review (45 min)"));
    }

    #[test]
    fn tracker_reports_id_of_created_event_even_when_already_listed() {
        let mut store = Store::new();
        let dispatcher = store.dispatcher();
        let listed = |id: EventId, title: &str| Event {
            id,
            title: title.to_string(),
            date_start: "2025-01-15T09:00:00.000Z".to_string(),
            date_end: "2025-01-15T10:00:00.000Z".to_string(),
        };
        store.apply(
            Notification::Load(user_events::store::LoadNotification::Succeeded(vec![
                listed(1, "One"),
                listed(2, "Two"),
            ]))
            .into(),
        );
        let tracking = CreatedIdTracker::new(&dispatcher);

        tracking.dispatch(Notification::Create(CreateNotification::Requested).into());
        tracking.dispatch(
            Notification::Create(CreateNotification::Succeeded(listed(1, "Recreated"))).into(),
        );
        store.drain();

        let created = tracking
            .created_id()
            .and_then(|id| select_user_event(&store.state().user_events, id))
            .unwrap();
        assert_eq!(created.title, "Recreated");
        assert_eq!(store.events().last().unwrap().title, "Two");
    }

    #[test]
    fn tracker_is_empty_when_create_fails() {
        let store = Store::new();
        let dispatcher = store.dispatcher();
        let tracking = CreatedIdTracker::new(&dispatcher);

        tracking.dispatch(Notification::Create(CreateNotification::Failed).into());

        assert_eq!(tracking.created_id(), None);
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(format_event_list(&[]), "No events.");
    }
}
