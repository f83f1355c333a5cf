// HTTP API surface

pub mod analyze;
pub mod health;
