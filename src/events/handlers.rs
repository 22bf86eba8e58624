use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::AppError,
    events::{
        dto::{CreateEventRequest, UpdateEventRequest},
        repo::Event,
    },
    notify::NotificationEvent,
    state::AppState,
};

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(organizer): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let event = Event::create(
        &state.db,
        organizer,
        payload.title.trim(),
        payload.description.as_deref(),
        payload.location.as_deref(),
        payload.start_date,
        payload.end_date,
        payload.image_url.as_deref(),
    )
    .await?;

    state.notifier.publish(NotificationEvent {
        title: "New Event".into(),
        message: format!("New event created: {}", event.title),
        link: format!("/events/{}", event.id),
    });

    info!(event_id = %event.id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = Event::list_all(&state.db).await?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn list_past_events(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = Event::list_past(&state.db).await?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn list_upcoming_events(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = Event::list_upcoming(&state.db).await?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = Event::find_by_id(&state.db, event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found"))?;
    Ok(Json(event))
}

#[instrument(skip(state, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(_editor): AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let event = Event::update(&state.db, event_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Event not found"))?;

    state.notifier.publish(NotificationEvent {
        title: "Event Update".into(),
        message: format!("Event updated: {}", event.title),
        link: format!("/events/{}", event.id),
    });

    info!(event_id = %event.id, "event updated");
    Ok(Json(event))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(_editor): AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let title = Event::delete(&state.db, event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found"))?;

    state.notifier.publish(NotificationEvent {
        title: "Event Cancellation".into(),
        message: format!("Event canceled: {}", title),
        link: "/events".into(),
    });

    info!(event_id = %event_id, "event deleted");
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
