// Health check route definitions

use axum::{routing::get, Router};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the health check endpoint
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(handler::health_handler))
}
