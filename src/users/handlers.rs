use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::AppError,
    state::AppState,
    users::{
        dto::UpdateProfileRequest,
        privacy::{filter_user, FilteredUser, PrivacyOverrides, PrivacySettings},
        repo::User,
    },
};

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<FilteredUser>>, AppError> {
    let users = User::list_all(&state.db).await?;
    let views = users.iter().map(filter_user).collect();
    Ok(Json(views))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FilteredUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(filter_user(&user)))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
    Json(mut payload): Json<UpdateProfileRequest>,
) -> Result<Json<FilteredUser>, AppError> {
    if let Some(contact) = payload.contact_info.as_mut() {
        contact.email = contact.email.trim().to_lowercase();
        if !crate::auth::handlers::is_valid_email(&contact.email) {
            return Err(AppError::BadRequest("Invalid email".into()));
        }
    }

    let user = User::update_profile(&state.db, user_id, &payload)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(filter_user(&user)))
}

/// Stored flags merged over the default set; missing keys fall back to
/// defaults, explicit values (including false) win.
#[instrument(skip(state))]
pub async fn get_privacy_settings(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PrivacySettings>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(user.privacy_flags()))
}

/// Merges the supplied keys over the existing stored flags (not over
/// defaults), persists, and responds with the backfilled view of the result.
#[instrument(skip(state, payload))]
pub async fn update_privacy_settings(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<PrivacyOverrides>,
) -> Result<Json<PrivacySettings>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let stored = user.privacy_settings.map(|j| j.0).unwrap_or_default();
    let merged = stored.merged_with(payload);

    if !User::set_privacy_overrides(&state.db, user_id, &merged).await? {
        return Err(AppError::NotFound("User not found"));
    }

    info!(user_id = %user_id, "privacy settings updated");
    Ok(Json(merged.backfilled()))
}
