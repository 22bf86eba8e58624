use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::AuthUser, error::AppError, notifications::repo::Notification, state::AppState,
};

#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = Notification::list_for_user(&state.db, user_id).await?;
    Ok(Json(notifications))
}

#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !Notification::mark_read(&state.db, notification_id, user_id).await? {
        return Err(AppError::NotFound("Notification not found"));
    }
    Ok(Json(json!({ "message": "Notification marked as read" })))
}

#[instrument(skip(state))]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, AppError> {
    let updated = Notification::mark_all_read(&state.db, user_id).await?;
    Ok(Json(json!({ "updated": updated })))
}
