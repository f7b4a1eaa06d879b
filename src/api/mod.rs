//! Development Backend
//!
//! A small JSON REST server standing in for the events backend, built
//! with Axum.
//!
//! # Endpoints
//!
//! ## Events
//! - `GET /events` - List all events
//! - `POST /events` - Create an event (id assigned by the server)
//! - `GET /events/:id` - Get an event
//! - `PUT /events/:id` - Replace an event
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use eventify::api::{serve, AppState};
//! use eventify::config::ServerConfig;
//! use eventify::repository::EventRepository;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let repository = Arc::new(EventRepository::open(&config.db_path).await?);
//!
//!     serve(AppState::new(repository, config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// CORS policy: permissive unless origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let event_routes = Router::new()
        .route(
            "/",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route(
            "/:id",
            get(routes::events::get_event).put(routes::events::update_event),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/events", event_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Eventify backend listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Eventify backend shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::repository::EventRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use eventify_core::Event;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn seed_event(id: u64) -> Event {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Event {}", id),
            "date": "2024-07-01",
            "time": "10:00 AM - 12:00 PM",
            "location": "New York",
            "price": "$20",
            "description": "Fun",
            "eventType": "festival"
        }))
        .unwrap()
    }

    fn create_test_app(events: Vec<Event>) -> Router {
        let repository = Arc::new(EventRepository::in_memory(events));
        build_router(AppState::new(repository, ServerConfig::default()))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn new_event_body() -> Body {
        Body::from(
            json!({
                "title": "Meetup",
                "date": "2024-09-01",
                "time": "18:00 - 20:00",
                "location": "India",
                "price": "Free",
                "description": "Monthly meetup",
                "eventType": "conference",
                "organiser": "Rust India",
                "email": "hi@example.com",
                "phoneNumber": "9876543210",
                "speaker": "Ferris",
                "videoUrl": "https://example.com/v",
                "zip": "560001"
            })
            .to_string(),
        )
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(Vec::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_counts_events() {
        let app = create_test_app(vec![seed_event(1), seed_event(2)]);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["events"], 2);
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_list_events() {
        let app = create_test_app(vec![seed_event(1), seed_event(2)]);

        let response = app
            .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["eventType"], "festival");
    }

    #[tokio::test]
    async fn test_get_event_and_not_found() {
        let app = create_test_app(vec![seed_event(4)]);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/events/4").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], 4);

        for uri in ["/events/5", "/events/abc"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "NOT_FOUND");
            assert!(body["request_id"].is_string());
        }
    }

    #[tokio::test]
    async fn test_create_event_assigns_next_id() {
        let app = create_test_app(vec![seed_event(7)]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/events")
                    .header("Content-Type", "application/json")
                    .body(new_event_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 8);
        assert_eq!(body["isRegistered"], false);
    }

    #[tokio::test]
    async fn test_update_event_path_id_wins() {
        let app = create_test_app(vec![seed_event(3)]);

        let mut payload = serde_json::to_value(seed_event(3)).unwrap();
        payload["id"] = json!("99");
        payload["isRegistered"] = json!(true);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/events/3")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 3);
        assert_eq!(body["isRegistered"], true);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/events/12")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_event_rejects_non_object() {
        let app = create_test_app(vec![seed_event(3)]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/events/3")
                    .header("Content-Type", "application/json")
                    .body(Body::from("[1, 2]"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_layer_accepts_bad_origins() {
        // Invalid header values are skipped rather than failing startup
        let _ = cors_layer(&["http://ok.example".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
