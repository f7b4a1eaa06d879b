//! Event record and date/time parsing
//!
//! This module defines the single domain record of Eventify:
//! - `Event`: An event as served by the backend (camelCase JSON)
//! - `EventId`: Numeric identifier, tolerant of string ids on the wire
//! - `EventType`: festival | conference | playground
//! - `NewEvent`: Payload posted when creating an event
//!
//! Dates are calendar dates (`YYYY-MM-DD`). Times are free-text ranges
//! such as `"10:00 AM - 12:00 PM"` or `"14:00 - 16:30"`; only the start
//! half takes part in sorting.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Separator between the start and end halves of a time range
pub const TIME_RANGE_SEPARATOR: &str = " - ";

/// Card image size on the dashboard
pub const LIST_IMAGE_SIZE: (u32, u32) = (300, 200);
/// Banner image size on the details page
pub const DETAIL_IMAGE_SIZE: (u32, u32) = (800, 400);

/// Numeric event identifier
///
/// Serialized as a JSON number. Deserialization also accepts numeric
/// strings, which some JSON file servers hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(EventId(n)),
            RawId::Text(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid event id: {}", s))),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(EventId)
            .map_err(|_| CoreError::InvalidEventId(s.to_string()))
    }
}

/// Kind of event, used by the category tabs and the analysis type filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Festival,
    Conference,
    Playground,
}

impl EventType {
    /// Get all event types for iteration
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Festival,
            EventType::Conference,
            EventType::Playground,
        ]
    }

    /// Wire name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Festival => "festival",
            EventType::Conference => "conference",
            EventType::Playground => "playground",
        }
    }

    /// Capitalized label for menus
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Festival => "Festival",
            EventType::Conference => "Conference",
            EventType::Playground => "Playground",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "festival" => Ok(EventType::Festival),
            "conference" => Ok(EventType::Conference),
            "playground" => Ok(EventType::Playground),
            _ => Err(CoreError::UnknownEventType(s.to_string())),
        }
    }
}

/// Whether an event still lies ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Upcoming,
    Completed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Upcoming => write!(f, "Upcoming"),
            EventStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// An event as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Free-text range, `"<start> - <end>"`
    pub time: String,
    pub location: String,
    pub price: String,
    pub description: String,
    /// Display image, assigned client-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub event_type: EventType,

    // Detail fields, absent from the dashboard feed of older backends
    #[serde(default)]
    pub organiser: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_registered: bool,
}

impl Event {
    /// Calendar date of the event, if `date` parses
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Start time of day, taken from the first half of `time`
    pub fn start_time(&self) -> Option<NaiveTime> {
        let (start, _) = split_time_range(&self.time);
        parse_time_of_day(start)
    }

    /// Start timestamp used for ordering
    ///
    /// A valid date with an unreadable time starts at midnight. An
    /// unreadable date has no start at all.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let date = self.calendar_date()?;
        let time = self.start_time().unwrap_or(NaiveTime::MIN);
        Some(date.and_time(time))
    }

    /// Upcoming when the date is strictly after `today`
    pub fn status(&self, today: NaiveDate) -> EventStatus {
        match self.calendar_date() {
            Some(date) if date > today => EventStatus::Upcoming,
            _ => EventStatus::Completed,
        }
    }

    /// Placeholder image for this event at the given size
    pub fn image_url(&self, width: u32, height: u32) -> String {
        format!(
            "https://picsum.photos/{}/{}?random={}",
            width, height, self.id
        )
    }

    /// Assign the placeholder image, builder style
    pub fn with_image(mut self, width: u32, height: u32) -> Self {
        self.image = Some(self.image_url(width, height));
        self
    }

    /// Embeddable map for the event's coordinates
    pub fn map_embed_url(&self) -> Option<String> {
        let (lat, lng) = (self.latitude?, self.longitude?);
        Some(format!(
            "https://www.google.com/maps?q={},{}&output=embed",
            lat, lng
        ))
    }
}

/// Payload posted to create an event (the backend assigns the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub price: String,
    pub description: String,
    pub event_type: EventType,
    pub organiser: String,
    pub email: String,
    pub phone_number: String,
    pub speaker: String,
    pub video_url: String,
    pub zip: String,
}

impl NewEvent {
    /// Materialize as a stored event with the given id
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            location: self.location,
            price: self.price,
            description: self.description,
            image: None,
            event_type: self.event_type,
            organiser: self.organiser,
            email: self.email,
            phone_number: self.phone_number,
            speaker: self.speaker,
            video_url: self.video_url,
            zip: self.zip,
            latitude: None,
            longitude: None,
            is_registered: false,
        }
    }
}

/// Parse a calendar date, tolerating an ISO datetime suffix
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Split `"<start> - <end>"` into its halves
pub fn split_time_range(time: &str) -> (&str, Option<&str>) {
    match time.split_once(TIME_RANGE_SEPARATOR) {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (time.trim(), None),
    }
}

/// Parse a time of day in 12-hour (`10:00 AM`, `10 AM`) or 24-hour
/// (`14:30`, `14:30:00`) notation
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let compact: String = input.split_whitespace().collect::<String>().to_uppercase();
    if compact.is_empty() {
        return None;
    }

    if let Some(clock) = compact
        .strip_suffix("AM")
        .or_else(|| compact.strip_suffix("PM"))
    {
        let meridiem = &compact[clock.len()..];
        let clock = if clock.contains(':') {
            clock.to_string()
        } else {
            format!("{}:00", clock)
        };
        return NaiveTime::parse_from_str(&format!("{}{}", clock, meridiem), "%I:%M%p").ok();
    }

    NaiveTime::parse_from_str(&compact, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&compact, "%H:%M"))
        .ok()
}
