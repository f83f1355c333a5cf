// Environment configuration and shared application state

pub mod environment;
pub mod state;
