//! Event Routes
//!
//! - GET /events - List all events
//! - POST /events - Create an event
//! - GET /events/:id - Get a specific event
//! - PUT /events/:id - Replace an event

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use eventify_core::{Event, EventId, NewEvent};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

fn parse_id(raw: &str) -> ApiResult<EventId> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Event with id {} not found", raw)))
}

/// GET /events
pub async fn list_events(State(state): State<Arc<AppState>>) -> Json<Vec<Event>> {
    Json(state.repository.list().await)
}

/// GET /events/:id
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Event>> {
    let id = parse_id(&raw_id)?;

    state
        .repository
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Event with id {} not found", id)))
}

/// POST /events
///
/// Assigns the next id and echoes the stored event.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewEvent>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("Event title is required".to_string()));
    }

    let event = state.repository.create(req).await?;

    tracing::info!(event_id = %event.id, title = %event.title, "Created event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /events/:id
///
/// Replaces the stored event. The id in the path wins over any id in the
/// body, and the body may omit it.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Json(mut body): Json<serde_json::Value>,
) -> ApiResult<Json<Event>> {
    let id = parse_id(&raw_id)?;

    let fields = body
        .as_object_mut()
        .ok_or_else(|| ApiError::Validation("Event body must be a JSON object".to_string()))?;
    fields.insert("id".to_string(), serde_json::json!(id.0));

    let event: Event = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid event: {}", e)))?;

    let updated = state
        .repository
        .update(id, event)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Event with id {} not found", id)))?;

    tracing::info!(event_id = %id, registered = updated.is_registered, "Updated event");

    Ok(Json(updated))
}
