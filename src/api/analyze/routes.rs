// Question analysis route definitions

use axum::{routing::post, Router};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the question analysis endpoint
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api", post(handler::analyze_handler))
}
