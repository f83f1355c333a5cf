pub mod extract;
pub mod handler;
pub mod prompt;
pub mod routes;
