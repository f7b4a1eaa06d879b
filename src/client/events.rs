//! Events backend client

use async_trait::async_trait;
use eventify_core::{Event, EventId, NewEvent};
use reqwest::Client;
use std::time::Duration;

use super::{build_http_client, decode, join_url, send, ClientResult, EventsApi};
use crate::config::BackendConfig;

/// REST client for `/events`
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    base_url: String,
}

impl EventsClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        Self::new(
            config.url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl EventsApi for EventsClient {
    async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let response = send(self.client.get(self.url("/events"))).await?;
        let events: Vec<Event> = decode(response).await?;
        tracing::debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    async fn get_event(&self, id: EventId) -> ClientResult<Event> {
        let response = send(self.client.get(self.url(&format!("/events/{}", id)))).await?;
        decode(response).await
    }

    async fn create_event(&self, event: &NewEvent) -> ClientResult<Option<Event>> {
        let response = send(self.client.post(self.url("/events")).json(event)).await?;

        // Success is decided by the status; a body that isn't an event is
        // tolerated and leaves id assignment to the caller.
        match decode::<Event>(response).await {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!(error = %e, "Create response carried no event");
                Ok(None)
            }
        }
    }

    async fn update_event(&self, event: &Event) -> ClientResult<()> {
        let url = self.url(&format!("/events/{}", event.id));
        send(self.client.put(url).json(event)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use eventify_core::EventType;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Event {}", id),
            "date": "2024-07-01",
            "time": "10:00 AM - 12:00 PM",
            "location": "New York",
            "price": "$20",
            "description": "Fun",
            "eventType": "festival"
        })
    }

    fn client(server: &MockServer) -> EventsClient {
        EventsClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn new_event() -> NewEvent {
        NewEvent {
            title: "Meetup".to_string(),
            date: "2024-09-01".to_string(),
            time: "18:00 - 20:00".to_string(),
            location: "India".to_string(),
            price: "Free".to_string(),
            description: "Monthly meetup".to_string(),
            event_type: EventType::Conference,
            organiser: "Rust India".to_string(),
            email: "hi@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            speaker: "Ferris".to_string(),
            video_url: "https://example.com/v".to_string(),
            zip: "560001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                event_json(1),
                event_json(2)
            ])))
            .mount(&server)
            .await;

        let events = client(&server).list_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, EventId(2));
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client(&server).get_event(EventId(9)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_list_events_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).list_events().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_event_returns_echo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events"))
            .and(body_partial_json(json!({"title": "Meetup", "eventType": "conference"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(event_json(42)))
            .mount(&server)
            .await;

        let created = client(&server).create_event(&new_event()).await.unwrap();
        assert_eq!(created.map(|e| e.id), Some(EventId(42)));
    }

    #[tokio::test]
    async fn test_create_event_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let created = client(&server).create_event(&new_event()).await.unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_update_event_puts_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/events/3"))
            .and(body_partial_json(json!({"id": 3, "isRegistered": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_json(3)))
            .expect(1)
            .mount(&server)
            .await;

        let mut event: Event = serde_json::from_value(event_json(3)).unwrap();
        event.is_registered = true;
        client(&server).update_event(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Nothing listens on port 9 of localhost
        let client = EventsClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.list_events().await.unwrap_err();
        assert!(!err.is_rejection());
    }
}
