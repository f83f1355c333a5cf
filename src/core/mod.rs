// Core runtime concerns: logging and server lifecycle

pub mod logging;
pub mod server;
