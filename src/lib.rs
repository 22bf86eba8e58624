pub mod app;
pub mod auth;
pub mod config;
pub mod donations;
pub mod error;
pub mod events;
pub mod forum;
pub mod jobs;
pub mod notifications;
pub mod notify;
pub mod state;
pub mod users;
