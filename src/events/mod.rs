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
        .route("/events", post(handlers::create_event).get(handlers::list_events))
        .route("/events/past", get(handlers::list_past_events))
        .route("/events/upcoming", get(handlers::list_upcoming_events))
        .route(
            "/events/:event_id",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
}
