//! Client-side Event Store
//!
//! A small reducer-style store holding the events the client knows about.
//! State only changes through [`StoreAction`]s passed to
//! [`EventStore::dispatch`].

use rand::Rng;
use std::collections::HashSet;

use crate::event::{Event, EventId};

/// Lowest id handed out by [`EventStore::generate_id`]
pub const MIN_GENERATED_ID: u64 = 1;
/// Highest id handed out by [`EventStore::generate_id`]
pub const MAX_GENERATED_ID: u64 = 10_000;

/// Actions accepted by the store reducer
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Replace all events
    SetEvents(Vec<Event>),
    /// Append a single event
    AddEvent(Event),
    /// Flag an event as registered
    MarkRegistered(EventId),
}

/// In-memory list of events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with events
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Apply an action to the store
    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetEvents(events) => {
                self.events = events;
            }
            StoreAction::AddEvent(event) => {
                self.events.push(event);
            }
            StoreAction::MarkRegistered(id) => {
                match self.events.iter_mut().find(|e| e.id == id) {
                    Some(event) => event.is_registered = true,
                    None => tracing::debug!(event_id = %id, "Registered event is not in the store"),
                }
            }
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Check whether an id is taken
    pub fn contains(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }

    /// Pick a random id in `1..=10000` that no stored event uses
    ///
    /// Once the random range is exhausted, falls back to one past the
    /// largest stored id.
    pub fn generate_id<R: Rng + ?Sized>(&self, rng: &mut R) -> EventId {
        let taken: HashSet<u64> = self.events.iter().map(|e| e.id.0).collect();
        let taken_in_range = taken
            .iter()
            .filter(|id| (MIN_GENERATED_ID..=MAX_GENERATED_ID).contains(*id))
            .count() as u64;

        if taken_in_range < MAX_GENERATED_ID - MIN_GENERATED_ID + 1 {
            loop {
                let candidate = rng.gen_range(MIN_GENERATED_ID..=MAX_GENERATED_ID);
                if !taken.contains(&candidate) {
                    return EventId(candidate);
                }
            }
        }

        let max = taken.iter().copied().max().unwrap_or(0);
        EventId(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::basic as event;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_set_and_add_events() {
        let mut store = EventStore::new();
        assert!(store.is_empty());

        store.dispatch(StoreAction::SetEvents(vec![event(1), event(2)]));
        assert_eq!(store.len(), 2);

        store.dispatch(StoreAction::AddEvent(event(3)));
        assert_eq!(store.len(), 3);
        assert_eq!(store.events()[2].id, EventId(3));

        store.dispatch(StoreAction::SetEvents(vec![event(9)]));
        assert_eq!(store.len(), 1);
        assert!(store.contains(EventId(9)));
    }

    #[test]
    fn test_mark_registered() {
        let mut store = EventStore::from_events(vec![event(1), event(2)]);
        store.dispatch(StoreAction::MarkRegistered(EventId(2)));

        assert!(!store.get(EventId(1)).unwrap().is_registered);
        assert!(store.get(EventId(2)).unwrap().is_registered);

        // Unknown ids leave the store untouched
        let before = store.clone();
        store.dispatch(StoreAction::MarkRegistered(EventId(77)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_generate_id_avoids_collisions() {
        let store = EventStore::from_events((1..=9_999).map(event).collect());
        let mut rng = StdRng::seed_from_u64(7);

        // Only 10000 is still free inside the range
        assert_eq!(store.generate_id(&mut rng), EventId(10_000));
    }

    #[test]
    fn test_generate_id_falls_back_past_max() {
        let mut events: Vec<Event> = (1..=10_000).map(event).collect();
        events.push(event(12_345));
        let store = EventStore::from_events(events);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(store.generate_id(&mut rng), EventId(12_346));
    }

    #[test]
    fn test_generate_id_in_range() {
        let store = EventStore::from_events(vec![event(5)]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let id = store.generate_id(&mut rng);
            assert!((MIN_GENERATED_ID..=MAX_GENERATED_ID).contains(&id.0));
            assert_ne!(id, EventId(5));
        }
    }
}
