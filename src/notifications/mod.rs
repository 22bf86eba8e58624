use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::list_notifications))
        .route("/notifications/read-all", put(handlers::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            put(handlers::mark_read),
        )
}
