// Global error handling for HTTP middleware layers

use axum::{BoxError, http::StatusCode, response::IntoResponse};
use std::error::Error;
// Axum uses http_body_util for length-limiting
use http_body_util::LengthLimitError;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;

/// Maps errors escaping the middleware layers to HTTP statuses.
/// Everything here still passes through the response wrapper, so the
/// caller sees the standard envelope.
pub async fn handle_global_error(err: BoxError) -> impl IntoResponse {
    // 413 if the body was too large
    if error_chain_contains::<LengthLimitError>(&*err) {
        return StatusCode::PAYLOAD_TOO_LARGE;
    }

    // 408 if the request took too long
    if err.is::<Elapsed>() {
        return StatusCode::REQUEST_TIMEOUT;
    }

    StatusCode::INTERNAL_SERVER_ERROR
}

/// Walks the source chain looking for a specific error type
fn error_chain_contains<T: Error + 'static>(err: &dyn Error) -> bool {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if s.is::<T>() {
            return true;
        }
        source = s.source();
    }

    false
}
