//! Shared helpers for backend integration tests: logging setup, the
//! problem+json contract and a websocket game client.

pub mod logging;
pub mod problem_details;
pub mod websocket_client;
