//! Dashboard HTTP service

pub mod handler;
pub mod server;

pub use handler::{AppState, SharedState};
pub use server::{router, HttpServer};
