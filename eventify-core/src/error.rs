//! Core error types
//!
//! Errors raised while parsing user-supplied selections (event types,
//! sort orders, month keys) and while serializing exports.

use thiserror::Error;

/// Errors that can occur in the core pipelines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Event type is not festival, conference or playground
    #[error("Unknown event type: {0}. Use festival, conference or playground")]
    UnknownEventType(String),

    /// Category filter is neither "all" nor an event type
    #[error("Unknown category: {0}. Use all, festival, conference or playground")]
    UnknownCategory(String),

    /// Sort order is neither ascending nor descending
    #[error("Unknown sort order: {0}. Use asc or desc")]
    UnknownSortOrder(String),

    /// Month key is not of the form YYYY-MM
    #[error("Invalid month: {0}. Use YYYY-MM or all")]
    InvalidMonth(String),

    /// Event id is not a non-negative integer
    #[error("Invalid event id: {0}")]
    InvalidEventId(String),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Export(err.to_string())
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
