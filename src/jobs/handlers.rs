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
    jobs::{
        dto::{CreateJobRequest, UpdateJobRequest},
        repo::Job,
    },
    notify::NotificationEvent,
    state::AppState,
};

#[instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(poster): AuthUser,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    if payload.title.trim().is_empty() || payload.company.trim().is_empty() {
        return Err(AppError::BadRequest("Title and company are required".into()));
    }

    let job = Job::create(
        &state.db,
        poster,
        payload.title.trim(),
        payload.company.trim(),
        payload.location.as_deref(),
        payload.description.as_deref(),
        payload.apply_url.as_deref(),
    )
    .await?;

    state.notifier.publish(NotificationEvent {
        title: "New Job".into(),
        message: format!("New job posted: {} at {}", job.title, job.company),
        link: format!("/jobs/{}", job.id),
    });

    info!(job_id = %job.id, "job posted");
    Ok((StatusCode::CREATED, Json(job)))
}

#[instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = Job::list_all(&state.db).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = Job::find_by_id(&state.db, job_id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    Ok(Json(job))
}

#[instrument(skip(state, payload))]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(_editor): AuthUser,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<UpdateJobRequest>,
) -> Result<Json<Job>, AppError> {
    let job = Job::update(&state.db, job_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;

    info!(job_id = %job.id, "job updated");
    Ok(Json(job))
}

#[instrument(skip(state))]
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(_editor): AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !Job::delete(&state.db, job_id).await? {
        return Err(AppError::NotFound("Job not found"));
    }

    info!(job_id = %job_id, "job deleted");
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
