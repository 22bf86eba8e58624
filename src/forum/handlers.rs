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
    forum::{
        dto::{AddCommentRequest, CreateThreadRequest, LikeResponse, ThreadDetails},
        repo::{Comment, Thread},
    },
    notify::NotificationEvent,
    state::AppState,
};

#[instrument(skip(state, payload))]
pub async fn create_thread(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Json(payload): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<Thread>), AppError> {
    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(AppError::BadRequest("Title and content are required".into()));
    }

    let thread = Thread::create(&state.db, author, payload.title.trim(), &payload.content).await?;

    state.notifier.publish(NotificationEvent {
        title: "New Discussion".into(),
        message: format!("New discussion started: {}", thread.title),
        link: format!("/forum/threads/{}", thread.id),
    });

    info!(thread_id = %thread.id, "thread created");
    Ok((StatusCode::CREATED, Json(thread)))
}

#[instrument(skip(state))]
pub async fn list_threads(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
) -> Result<Json<Vec<Thread>>, AppError> {
    let threads = Thread::list_all(&state.db).await?;
    Ok(Json(threads))
}

#[instrument(skip(state))]
pub async fn get_thread(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<ThreadDetails>, AppError> {
    let thread = Thread::find_by_id(&state.db, thread_id)
        .await?
        .ok_or(AppError::NotFound("Thread not found"))?;
    let comments = Comment::list_for_thread(&state.db, thread_id).await?;
    Ok(Json(ThreadDetails { thread, comments }))
}

#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Path(thread_id): Path<Uuid>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".into()));
    }

    // comment rows reference the thread; check first for a clean 404
    if Thread::find_by_id(&state.db, thread_id).await?.is_none() {
        return Err(AppError::NotFound("Thread not found"));
    }

    let comment = Comment::create(&state.db, thread_id, author, &payload.content).await?;

    info!(thread_id = %thread_id, comment_id = %comment.id, "comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state))]
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, AppError> {
    let likes = Thread::toggle_like(&state.db, thread_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Thread not found"))?;

    Ok(Json(LikeResponse {
        liked: likes.contains(&user_id),
        like_count: likes.len(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let thread = Thread::find_by_id(&state.db, thread_id)
        .await?
        .ok_or(AppError::NotFound("Thread not found"))?;

    if thread.author != user_id {
        return Err(AppError::Forbidden("Only the author can delete a thread"));
    }

    Thread::delete(&state.db, thread_id).await?;

    info!(thread_id = %thread_id, "thread deleted");
    Ok(Json(json!({ "message": "Thread deleted successfully" })))
}
