// Library root for the data analyst agent HTTP service

pub mod api;
pub mod config;
pub mod core;
pub mod llm;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
