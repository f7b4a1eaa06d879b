//! Form models and validation
//!
//! - `EventForm`: The create-event form, validated rule by rule
//! - `SignupForm` / `SignupFlow`: Two-step signup with per-field errors
//! - `Credentials`: Login form

mod event_form;
mod login;
mod signup;

pub use event_form::{EventForm, LOCATIONS};
pub use login::Credentials;
pub use signup::{SignupField, SignupFlow, SignupForm, SignupStep};

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// First failed rule of a form
///
/// The display strings are shown to the user verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Event name and organiser should be of max 15 characters. Speaker name should be of max 50 characters.")]
    NameTooLong,

    #[error("Description should be of max 50 characters.")]
    DescriptionTooLong,

    #[error("End time cannot be less than start time.")]
    EndBeforeStart,

    #[error("Start and end time must be valid times.")]
    InvalidTime,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Phone number should be 10 digits.")]
    InvalidPhone,

    #[error("Zip code should be exactly 6 digits.")]
    InvalidZip,

    #[error("Invalid video URL format.")]
    InvalidVideoUrl,

    #[error("Username and password are required.")]
    MissingCredentials,
}

/// Lazily compiled pattern
///
/// Resolves to `None` only if the pattern itself is malformed, in which case
/// nothing matches.
fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(pattern = source, error = %e, "Invalid form pattern");
            None
        }
    })
    .as_ref()
}

fn matches(cell: &'static OnceLock<Option<Regex>>, source: &str, input: &str) -> bool {
    pattern(cell, source).is_some_and(|re| re.is_match(input))
}

/// Exactly `len` ASCII digits
fn is_digits(input: &str, len: usize) -> bool {
    input.len() == len && input.bytes().all(|b| b.is_ascii_digit())
}

/// Length as the user perceives it
fn char_len(input: &str) -> usize {
    input.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_digits() {
        assert!(is_digits("0123456789", 10));
        assert!(!is_digits("012345678", 10));
        assert!(!is_digits("01234a6789", 10));
        assert!(!is_digits("１２３４５６", 6));
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("Fête"), 4);
    }
}
