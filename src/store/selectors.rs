use crate::calendar::{Event, EventId};
use crate::store::state::EventsState;

/// Events in display order. Ids with no entry are skipped.
pub fn select_user_events_array(state: &EventsState) -> Vec<&Event> {
    state
        .all_ids
        .iter()
        .filter_map(|id| state.by_ids.get(id))
        .collect()
}

pub fn select_user_event(state: &EventsState, id: EventId) -> Option<&Event> {
    state.by_ids.get(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: EventId) -> Event {
        Event {
            id,
            title: format!("Event {}", id),
            date_start: String::new(),
            date_end: String::new(),
        }
    }

    #[test]
    fn empty_state_selects_nothing() {
        let state = EventsState::new();

        assert!(select_user_events_array(&state).is_empty());
    }

    #[test]
    fn follows_all_ids_order_not_map_order() {
        let mut state = EventsState::new();
        for id in [3, 1, 2] {
            state.by_ids.insert(id, event(id));
        }
        state.all_ids = vec![3, 1, 2];

        let ids: Vec<EventId> = select_user_events_array(&state).iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn single_lookup_by_id() {
        let mut state = EventsState::new();
        state.by_ids.insert(4, event(4));
        state.all_ids = vec![4];

        assert_eq!(select_user_event(&state, 4).map(|e| e.id), Some(4));
        assert!(select_user_event(&state, 5).is_none());
    }
}
