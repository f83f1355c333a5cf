// Application state management with singleton pattern

use std::sync::Arc;
use once_cell::sync::Lazy;

use crate::config::environment::EnvironmentVariables;
use crate::llm::{gemini::GeminiProvider, LlmClient};

// AppState singleton
#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub llm: LlmClient,
}

impl AppState {
    /// Creates a new AppState instance (private constructor)
    fn new() -> anyhow::Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;
        let environment_arc: Arc<EnvironmentVariables> = Arc::new(environment);

        // Wire the Gemini provider behind the retrying client
        let provider: GeminiProvider = GeminiProvider::new(environment_arc.clone());
        let llm: LlmClient = LlmClient::new(Arc::new(provider), environment_arc.llm_max_retries);

        Ok(Self {
            environment: environment_arc,
            llm,
        })
    }

    /// Returns the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: Lazy<AppState> = Lazy::new(|| {
            AppState::new().expect("Failed to initialize AppState")
        });
        &INSTANCE
    }
}
