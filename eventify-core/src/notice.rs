//! Transient user-facing notifications
//!
//! User flows never propagate errors to the caller. They log the cause and
//! hand back a `Notice` for a toast or a CLI status line.

use serde::Serialize;
use std::fmt;

/// Texts of the notices the user flows raise
pub mod messages {
    pub const LOAD_FAILED: &str = "Failed to load events.";
    pub const EVENT_LOAD_FAILED: &str = "Failed to load event.";
    pub const ALREADY_REGISTERED: &str = "You have already registered for this event.";
    pub const REGISTERED: &str = "Successfully registered for the event!";
    pub const REGISTER_FAILED: &str = "Error registering for the event.";
    pub const EVENT_CREATED: &str = "Event created successfully!";
    pub const CREATE_FAILED: &str = "Failed to create event. Please try again.";
    pub const UNEXPECTED_ERROR: &str = "An error occurred. Please try again.";
    pub const LOGIN_SUCCEEDED: &str = "Login successful!";
    pub const LOGIN_REJECTED: &str = "Invalid credentials. Please try again.";
    pub const SIGNUP_SUCCEEDED: &str = "Welcome! You have signed up successfully.";
    pub const SIGNUP_REJECTED: &str = "Signup failed. Please try again.";
    pub const LOGGED_OUT: &str = "You have been logged out.";
    /// Shown when a guarded page is opened without a login
    pub const LOGIN_REQUIRED: &str = "You must be logged in to access this page.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A message with a severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<crate::forms::FormError> for Notice {
    fn from(err: crate::forms::FormError) -> Self {
        Notice::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    #[test]
    fn test_constructors() {
        let notice = Notice::success("Event created successfully!");
        assert!(notice.is_success());
        assert_eq!(notice.to_string(), "Event created successfully!");
        assert!(Notice::error("x").is_error());
        assert_eq!(Notice::info("x").level, NoticeLevel::Info);
    }

    #[test]
    fn test_from_form_error() {
        let notice: Notice = FormError::InvalidZip.into();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Zip code should be exactly 6 digits.");
    }
}
