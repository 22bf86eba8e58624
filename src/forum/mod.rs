use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/forum/threads",
            post(handlers::create_thread).get(handlers::list_threads),
        )
        .route(
            "/forum/threads/:thread_id",
            get(handlers::get_thread).delete(handlers::delete_thread),
        )
        .route(
            "/forum/threads/:thread_id/comments",
            post(handlers::add_comment),
        )
        .route("/forum/threads/:thread_id/like", post(handlers::toggle_like))
}
