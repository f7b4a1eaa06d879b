//! HTTP Clients
//!
//! Clients for the two services the app talks to:
//! - [`EventsClient`]: The events backend (`/events`)
//! - [`AuthClient`]: The third-party auth API (`/auth/login`, `/users`)
//!
//! The flows in [`crate::actions`] only see the [`EventsApi`] and
//! [`AuthApi`] traits, so tests can swap in fakes.

mod auth;
mod error;
mod events;

pub use auth::AuthClient;
pub use error::{ClientError, ClientResult};
pub use events::EventsClient;

use async_trait::async_trait;
use eventify_core::{Credentials, Event, EventId, NewEvent, SignupForm};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use error::classify;

/// Operations on the events backend
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Fetch every event
    async fn list_events(&self) -> ClientResult<Vec<Event>>;

    /// Fetch one event
    async fn get_event(&self, id: EventId) -> ClientResult<Event>;

    /// Create an event
    ///
    /// Returns the stored event when the backend echoes one back.
    async fn create_event(&self, event: &NewEvent) -> ClientResult<Option<Event>>;

    /// Replace an event
    async fn update_event(&self, event: &Event) -> ClientResult<()>;
}

/// Operations on the auth API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Log in, returning the user payload to remember
    async fn login(&self, credentials: &Credentials) -> ClientResult<serde_json::Value>;

    /// Register a new user
    async fn signup(&self, form: &SignupForm) -> ClientResult<()>;
}

/// Build a reqwest client with a request timeout
fn build_http_client(timeout: Duration) -> ClientResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Build(e.to_string()))
}

/// Join a base URL and a path without doubling slashes
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send a request, turning non-success statuses into [`ClientError::Api`]
async fn send(request: RequestBuilder) -> ClientResult<Response> {
    let response = request.send().await.map_err(classify)?;

    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: text,
        })
    }
}

/// Read and decode a JSON body
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let text = response.text().await.map_err(classify)?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:5000/", "/events"),
            "http://localhost:5000/events"
        );
        assert_eq!(
            join_url("http://localhost:5000", "events/3"),
            "http://localhost:5000/events/3"
        );
    }
}
