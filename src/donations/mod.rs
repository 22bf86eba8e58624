use crate::state::AppState;
use axum::{routing::post, Router};

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/donations",
        post(handlers::create_donation).get(handlers::list_donations),
    )
}
