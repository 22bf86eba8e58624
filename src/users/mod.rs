use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

mod dto;
pub mod handlers;
pub mod privacy;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/users/:user_id/profile", put(handlers::update_profile))
        .route(
            "/users/:user_id/privacy-settings",
            get(handlers::get_privacy_settings).put(handlers::update_privacy_settings),
        )
}
