// Health check handler

use serde_json::json;
use axum::{http::StatusCode, extract::State};
use tracing::{instrument, info};

use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

/// Returns service status and instance information
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<AppState>) -> HandlerResponse {
    info!("Health check endpoint called");

    let instance: String = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.environment.environment.as_ref(),
            "instance": instance
        }))
        .message("Service is running")
}
