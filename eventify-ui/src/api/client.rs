//! HTTP API Client
//!
//! Functions for communicating with the events backend and the auth API.

use eventify_core::{Credentials, Event, EventId, NewEvent, SignupForm};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use std::fmt;

/// Default events backend URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Third-party auth API
pub const AUTH_BASE: &str = "https://fakestoreapi.com";

/// Local-storage key overriding the events backend URL
const API_URL_KEY: &str = "eventify_api_url";

/// Get the events backend URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Why a call failed
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never got a response
    Network(String),
    /// The server answered with a non-OK status
    Status(u16),
    /// The body could not be read or decoded
    Parse(String),
}

impl FetchError {
    /// Whether the server answered and said no
    pub fn is_rejection(&self) -> bool {
        matches!(self, FetchError::Status(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "Network error: {}", e),
            FetchError::Status(code) => write!(f, "Server returned {}", code),
            FetchError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

fn network(err: gloo_net::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

fn check(response: Response) -> Result<Response, FetchError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(FetchError::Status(response.status()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let text = response.text().await.map_err(network)?;
    serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
}

// ============ Events ============

/// Fetch all events
pub async fn fetch_events() -> Result<Vec<Event>, FetchError> {
    let response = Request::get(&format!("{}/events", get_api_base()))
        .send()
        .await
        .map_err(network)?;

    decode(check(response)?).await
}

/// Fetch a single event
pub async fn fetch_event(id: EventId) -> Result<Event, FetchError> {
    let response = Request::get(&format!("{}/events/{}", get_api_base(), id))
        .send()
        .await
        .map_err(network)?;

    decode(check(response)?).await
}

/// Create an event, returning the stored copy when the backend echoes one
pub async fn create_event(event: &NewEvent) -> Result<Option<Event>, FetchError> {
    let response = Request::post(&format!("{}/events", get_api_base()))
        .json(event)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    let response = check(response)?;
    let text = response.text().await.map_err(network)?;
    Ok(serde_json::from_str(&text).ok())
}

/// Replace an event
pub async fn update_event(event: &Event) -> Result<(), FetchError> {
    let response = Request::put(&format!("{}/events/{}", get_api_base(), event.id))
        .json(event)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    check(response).map(|_| ())
}

// ============ Auth ============

/// Log in, returning the user payload
pub async fn login(credentials: &Credentials) -> Result<serde_json::Value, FetchError> {
    let body = serde_json::json!({
        "username": credentials.username,
        "password": credentials.password,
    });

    let response = Request::post(&format!("{}/auth/login", AUTH_BASE))
        .json(&body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    decode(check(response)?).await
}

/// Register a new user
pub async fn signup(form: &SignupForm) -> Result<(), FetchError> {
    let response = Request::post(&format!("{}/users", AUTH_BASE))
        .json(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    check(response).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:5000/"), "http://localhost:5000");
        assert_eq!(normalize_base(DEFAULT_API_BASE), DEFAULT_API_BASE);
    }

    #[test]
    fn test_only_status_errors_are_rejections() {
        assert!(FetchError::Status(401).is_rejection());
        assert!(!FetchError::Network("offline".into()).is_rejection());
        assert!(!FetchError::Parse("eof".into()).is_rejection());
    }
}
