//! Create-event form

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::{char_len, is_digits, matches, FormError};
use crate::event::{parse_time_of_day, EventType, NewEvent, TIME_RANGE_SEPARATOR};

/// Locations offered by the location select
pub const LOCATIONS: [&str; 4] = ["United States", "India", "United Kingdom", "Australia"];

const MAX_NAME_LEN: usize = 15;
const MAX_SPEAKER_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 50;

static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
static VIDEO_URL: OnceLock<Option<Regex>> = OnceLock::new();

/// Raw input of the create-event form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
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

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            location: LOCATIONS[0].to_string(),
            price: String::new(),
            description: String::new(),
            event_type: EventType::Festival,
            organiser: String::new(),
            email: String::new(),
            phone_number: String::new(),
            speaker: String::new(),
            video_url: String::new(),
            zip: String::new(),
        }
    }
}

impl EventForm {
    /// Check the rules in order and report the first one that fails
    pub fn validate(&self) -> Result<(), FormError> {
        let required = [
            &self.title,
            &self.date,
            &self.start_time,
            &self.end_time,
            &self.location,
            &self.price,
            &self.description,
            &self.organiser,
            &self.email,
            &self.phone_number,
            &self.speaker,
            &self.video_url,
            &self.zip,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(FormError::MissingFields);
        }

        if char_len(&self.title) > MAX_NAME_LEN
            || char_len(&self.organiser) > MAX_NAME_LEN
            || char_len(&self.speaker) > MAX_SPEAKER_LEN
        {
            return Err(FormError::NameTooLong);
        }

        if char_len(&self.description) > MAX_DESCRIPTION_LEN {
            return Err(FormError::DescriptionTooLong);
        }

        match (
            parse_time_of_day(&self.start_time),
            parse_time_of_day(&self.end_time),
        ) {
            (Some(start), Some(end)) if end < start => return Err(FormError::EndBeforeStart),
            (Some(_), Some(_)) => {}
            _ => return Err(FormError::InvalidTime),
        }

        if !matches(&EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$", &self.email) {
            return Err(FormError::InvalidEmail);
        }

        if !is_digits(&self.phone_number, 10) {
            return Err(FormError::InvalidPhone);
        }

        if !is_digits(&self.zip, 6) {
            return Err(FormError::InvalidZip);
        }

        if !matches(&VIDEO_URL, r#"^(ftp|http|https)://[^ "]+$"#, &self.video_url) {
            return Err(FormError::InvalidVideoUrl);
        }

        Ok(())
    }

    /// Build the POST payload, joining the two times into one range
    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            date: self.date.clone(),
            time: format!("{}{}{}", self.start_time, TIME_RANGE_SEPARATOR, self.end_time),
            location: self.location.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
            event_type: self.event_type,
            organiser: self.organiser.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            speaker: self.speaker.clone(),
            video_url: self.video_url.clone(),
            zip: self.zip.clone(),
        }
    }

    /// Validate, then build the payload
    pub fn submit(&self) -> Result<NewEvent, FormError> {
        self.validate()?;
        Ok(self.to_new_event())
    }
}
