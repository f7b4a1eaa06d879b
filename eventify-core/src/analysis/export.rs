//! CSV export of the analysis table

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::event::Event;

/// File name offered for the download
pub const EXPORT_FILENAME: &str = "event_data.csv";

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Event")]
    title: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Organiser")]
    organiser: &'a str,
    #[serde(rename = "Type")]
    event_type: &'static str,
    #[serde(rename = "Status")]
    status: String,
}

/// Render `events` as CSV, one row per event after the header
pub fn export_csv(events: &[Event], today: NaiveDate) -> CoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if events.is_empty() {
        // Serialize only emits headers alongside the first record
        writer.write_record([
            "ID",
            "Event",
            "Description",
            "Date",
            "Location",
            "Organiser",
            "Type",
            "Status",
        ])?;
    }

    for event in events {
        writer.serialize(ExportRow {
            id: event.id.0,
            title: &event.title,
            description: &event.description,
            date: &event.date,
            location: &event.location,
            organiser: &event.organiser,
            event_type: event.event_type.as_str(),
            status: event.status(today).to_string(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}
