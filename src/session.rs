//! Session persistence
//!
//! Remembers the logged-in user between CLI invocations in a JSON file.
//! [`SessionStore::require`] is the guard in front of every page that needs
//! a login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use eventify_core::notice::messages::LOGIN_REQUIRED;

/// The logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    /// Payload returned by the auth API
    pub user: serde_json::Value,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, user: serde_json::Value) -> Self {
        Self {
            username: username.into(),
            user,
            logged_in_at: Utc::now(),
        }
    }
}

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{}", LOGIN_REQUIRED)]
    NotLoggedIn,

    #[error("Session file error {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Corrupt session file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// JSON-file session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        }
    }

    /// Read the current session, if any
    pub fn load(&self) -> SessionResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            })
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|e| SessionError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!(username = %session.username, path = ?self.path, "Session saved");
        Ok(())
    }

    /// Forget the current session
    pub fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Return the session or fail with [`SessionError::NotLoggedIn`]
    ///
    /// An unreadable session file counts as logged out.
    pub fn require(&self) -> SessionResult<Session> {
        match self.load() {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(SessionError::NotLoggedIn),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session");
                Err(SessionError::NotLoggedIn)
            }
        }
    }
}
