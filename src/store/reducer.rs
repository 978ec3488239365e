use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::store::notification::{
    CreateNotification, DeleteNotification, LoadNotification, Notification, UpdateNotification,
};
use crate::store::state::EventsState;

/// Folds one notification into the normalized event collection.
///
/// Only success notifications change anything. Preconditions are not
/// enforced: an update for an id the store never listed leaves an entry in
/// `by_ids` with no matching `all_ids` slot. A load that repeats an id keeps
/// only its first occurrence.
pub fn user_events_reducer(state: EventsState, notification: Notification) -> EventsState {
    match notification {
        Notification::Load(LoadNotification::Succeeded(events)) => {
            let mut by_ids = HashMap::with_capacity(events.len());
            let mut all_ids = Vec::with_capacity(events.len());
            for event in events {
                if let Entry::Vacant(slot) = by_ids.entry(event.id) {
                    all_ids.push(event.id);
                    slot.insert(event);
                }
            }
            EventsState { by_ids, all_ids }
        }
        Notification::Create(CreateNotification::Succeeded(event)) => {
            let mut next = state;
            if !next.all_ids.contains(&event.id) {
                next.all_ids.push(event.id);
            }
            next.by_ids.insert(event.id, event);
            next
        }
        Notification::Update(UpdateNotification::Succeeded(event)) => {
            let mut next = state;
            next.by_ids.insert(event.id, event);
            next
        }
        Notification::Delete(DeleteNotification::Succeeded(id)) => {
            let mut next = state;
            next.all_ids.retain(|existing| *existing != id);
            next.by_ids.remove(&id);
            next
        }
        Notification::Load(LoadNotification::Requested | LoadNotification::Failed(_))
        | Notification::Create(CreateNotification::Requested | CreateNotification::Failed)
        | Notification::Update(UpdateNotification::Requested | UpdateNotification::Failed)
        | Notification::Delete(DeleteNotification::Requested | DeleteNotification::Failed) => state,
    }
}
