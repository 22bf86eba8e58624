use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    donations::{dto::CreateDonationRequest, repo::Donation},
    error::AppError,
    state::AppState,
};

#[instrument(skip(state, payload))]
pub async fn create_donation(
    State(state): State<AppState>,
    AuthUser(donor): AuthUser,
    Json(payload): Json<CreateDonationRequest>,
) -> Result<(StatusCode, Json<Donation>), AppError> {
    if payload.amount_cents <= 0 {
        return Err(AppError::BadRequest("Amount must be positive".into()));
    }

    let donation = Donation::create(
        &state.db,
        donor,
        payload.amount_cents,
        payload.message.as_deref(),
    )
    .await?;

    info!(donation_id = %donation.id, amount_cents = donation.amount_cents, "donation recorded");
    Ok((StatusCode::CREATED, Json(donation)))
}

#[instrument(skip(state))]
pub async fn list_donations(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Donation>>, AppError> {
    let donations = Donation::list_all(&state.db).await?;
    Ok(Json(donations))
}
