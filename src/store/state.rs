use std::collections::{HashMap, HashSet};

use crate::calendar::{Event, EventId};

/// Normalized event collection: `all_ids` holds display order, `by_ids` the entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsState {
    pub by_ids: HashMap<EventId, Event>,
    pub all_ids: Vec<EventId>,
}

impl EventsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries reachable through `by_ids` but missing from `all_ids`.
    ///
    /// These only appear after an update for an id the store never listed.
    pub fn orphaned_ids(&self) -> Vec<EventId> {
        let listed: HashSet<EventId> = self.all_ids.iter().copied().collect();
        let mut orphans: Vec<EventId> = self
            .by_ids
            .keys()
            .filter(|id| !listed.contains(id))
            .copied()
            .collect();
        orphans.sort_unstable();
        orphans
    }

    pub fn is_consistent(&self) -> bool {
        let listed: HashSet<EventId> = self.all_ids.iter().copied().collect();
        listed.len() == self.all_ids.len()
            && listed.len() == self.by_ids.len()
            && listed.iter().all(|id| self.by_ids.contains_key(id))
    }
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
    fn new_state_is_empty_and_consistent() {
        let state = EventsState::new();

        assert!(state.all_ids.is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn duplicate_ids_are_inconsistent() {
        let mut state = EventsState::new();
        state.by_ids.insert(1, event(1));
        state.all_ids = vec![1, 1];

        assert!(!state.is_consistent());
    }

    #[test]
    fn unlisted_entry_is_reported_as_orphan() {
        let mut state = EventsState::new();
        state.by_ids.insert(1, event(1));
        state.by_ids.insert(5, event(5));
        state.all_ids = vec![1];

        assert_eq!(state.orphaned_ids(), vec![5]);
        assert!(!state.is_consistent());
    }
}
