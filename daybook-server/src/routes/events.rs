//! Event CRUD endpoints
//!
//! Every response carries the `success` envelope; failures come back as
//! `{ "success": false, "error": ... }` with a matching status code.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use daybook_core::event::{
    Event, EventCategory, EventDraft, EventPatch, EventPriority, EventStatus,
};
use daybook_core::store::EventFilter;
use daybook_core::DaybookError;

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventListResponse {
    pub success: bool,
    pub events: Vec<Event>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    /// Comma-separated tag list; any match qualifies.
    tags: Option<String>,
}

/// GET /events?startDate&endDate&tags
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<EventListResponse>, ApiError> {
    let range = match (params.start_date, params.end_date) {
        (Some(start), Some(end)) => Some((start, end)),
        _ => None,
    };
    let tags: Vec<String> = params
        .tags
        .map(|t| t.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let filter = EventFilter {
        range,
        tags,
        ..EventFilter::default()
    };
    let events = state.events.query(&filter)?;
    let count = events.len();

    Ok(Json(EventListResponse {
        success: true,
        events,
        count,
    }))
}

/// Request body for creating an event. Only `title` and `start` are
/// mandatory; a client pushing its stored copy may carry the full record,
/// including its locally assigned id, which is preserved so ids stay stable
/// across sync.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start: Option<DateTime<Utc>>,
    #[serde(default)]
    end: Option<DateTime<Utc>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    category: EventCategory,
    #[serde(default)]
    status: EventStatus,
    #[serde(default)]
    priority: EventPriority,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    recurring: bool,
    #[serde(default)]
    reminder_minutes: Option<i64>,
}

/// POST /events
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| DaybookError::Validation("title is required".to_string()))?;
    let start = req
        .start
        .ok_or_else(|| DaybookError::Validation("start is required".to_string()))?;
    let end = req.end.unwrap_or(start + Duration::hours(1));

    let mut draft = EventDraft::new(title, start, end);
    draft.description = req.description;
    draft.location = req.location;
    draft.all_day = req.all_day;
    draft.category = req.category;
    draft.status = req.status;
    draft.priority = req.priority;
    draft.tags = req.tags;
    draft.recurring = req.recurring;
    draft.reminder_minutes = req.reminder_minutes;
    draft.validate()?;

    let mut event = Event::from_draft(&draft);
    if let Some(id) = req.id {
        event.id = id;
    }
    state.events.insert(&event)?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            success: true,
            event,
        }),
    ))
}

/// GET /events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state
        .events
        .get_by_id(id)?
        .ok_or_else(|| DaybookError::NotFound(id.to_string()))?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// PUT /events/{id} (server-side merge, `updatedAt` refreshed)
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state.events.update(id, &patch)?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// DELETE /events/{id}
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.events.delete(id)?;

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Event {} deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(dir.path()).unwrap()
    }

    fn create_request(json: serde_json::Value) -> CreateEventRequest {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let req = create_request(serde_json::json!({
            "title": "Standup",
            "start": "2026-02-24T09:00:00Z",
            "end": "2026-02-24T09:30:00Z"
        }));
        let (status, Json(created)) = create_event(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.success);

        let Json(fetched) = get_event(State(state), Path(created.event.id)).await.unwrap();
        assert_eq!(fetched.event, created.event);
    }

    #[tokio::test]
    async fn create_preserves_client_assigned_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let id = Uuid::new_v4();

        let req = create_request(serde_json::json!({
            "id": id,
            "title": "Standup",
            "start": "2026-02-24T09:00:00Z"
        }));
        let (_, Json(created)) = create_event(State(state), Json(req)).await.unwrap();
        assert_eq!(created.event.id, id);
    }

    #[tokio::test]
    async fn create_without_title_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let req = create_request(serde_json::json!({
            "start": "2026-02-24T09:00:00Z"
        }));
        let err = create_event(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_unknown_id_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let err = get_event(State(test_state(&dir)), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let req = create_request(serde_json::json!({
            "title": "Standup",
            "start": "2026-02-24T09:00:00Z"
        }));
        let (_, Json(created)) = create_event(State(state.clone()), Json(req))
            .await
            .unwrap();

        let patch = EventPatch {
            title: Some("Daily standup".to_string()),
            ..EventPatch::default()
        };
        let Json(updated) = update_event(State(state), Path(created.event.id), Json(patch))
            .await
            .unwrap();
        assert_eq!(updated.event.title, "Daily standup");
        assert!(updated.event.updated_at >= created.event.updated_at);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let err = delete_event(State(test_state(&dir)), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_by_range_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (_, Json(team)) = create_event(
            State(state.clone()),
            Json(create_request(serde_json::json!({
                "title": "Planning",
                "start": "2026-02-24T09:00:00Z",
                "end": "2026-02-24T10:00:00Z",
                "tags": ["team"]
            }))),
        )
        .await
        .unwrap();

        create_event(
            State(state.clone()),
            Json(create_request(serde_json::json!({
                "title": "Gym",
                "start": "2026-02-25T18:00:00Z",
                "end": "2026-02-25T19:00:00Z"
            }))),
        )
        .await
        .unwrap();

        let params: ListParams = serde_json::from_value(serde_json::json!({
            "startDate": "2026-02-24T00:00:00Z",
            "endDate": "2026-02-24T23:59:59Z",
            "tags": "team,family"
        }))
        .unwrap();
        let Json(listed) = list_events(State(state), Query(params)).await.unwrap();

        assert_eq!(listed.count, 1);
        assert_eq!(listed.events[0].id, team.event.id);
    }
}
