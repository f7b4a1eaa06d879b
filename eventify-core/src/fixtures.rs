//! Shared event builders for unit tests

use crate::event::{Event, EventId, EventType};

/// Event with the fields the pipelines look at; the rest stay empty
pub fn event(id: u64, date: &str, time: &str, location: &str, event_type: EventType) -> Event {
    Event {
        id: EventId(id),
        title: format!("Event {}", id),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        price: "$10".to_string(),
        description: format!("Description {}", id),
        image: None,
        event_type,
        organiser: "Org".to_string(),
        email: String::new(),
        phone_number: String::new(),
        speaker: String::new(),
        video_url: String::new(),
        zip: String::new(),
        latitude: None,
        longitude: None,
        is_registered: false,
    }
}

/// Festival in Berlin on 2024-05-01
pub fn basic(id: u64) -> Event {
    event(id, "2024-05-01", "10:00 AM - 11:00 AM", "Berlin", EventType::Festival)
}
