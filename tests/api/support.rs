//! tests/api/support.rs
//! Shared fixtures for the api tests: a mock Gemini backend plus the
//! environment wiring that points the app at it.

use std::sync::Once;

use axum::Json;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Canned `generateContent` reply with prose around the JSON payload,
/// so the extraction path is exercised end to end.
async fn mock_generate_content() -> Json<Value> {
    Json(json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "text": "Here is the analysis:\n{\"answer\": 42, \"confidence\": \"high\"}"
                }]
            },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.0-flash-lite"
    }))
}

// The mock runs on its own thread and runtime so it outlives any single
// #[tokio::test] runtime in this binary.
static MOCK_GEMINI_URL: Lazy<String> = Lazy::new(|| {
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind mock Gemini port");
    let addr: std::net::SocketAddr = std_listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build mock runtime");

        rt.block_on(async move {
            std_listener.set_nonblocking(true).unwrap();
            let listener = tokio::net::TcpListener::from_std(std_listener)
                .expect("Failed to convert mock listener");

            let app = axum::Router::new().fallback(mock_generate_content);
            axum::serve(listener, app).await.expect("Mock Gemini failed");
        });
    });

    format!("http://{}", addr)
});

static ENV_INIT: Once = Once::new();

/// Points the app at the mock backend. Must run before the first
/// `spawn_app` in this binary so the configuration singleton picks it up.
pub fn setup_llm_env() {
    ENV_INIT.call_once(|| {
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("GEMINI_BASE_URL", &*MOCK_GEMINI_URL);
    });
}
