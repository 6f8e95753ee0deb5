#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod error;
pub mod errors;
pub mod games;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod trace_ctx;
pub mod ws;

pub use config::ServerConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::request_trace::RequestTrace;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
