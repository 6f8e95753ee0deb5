//! Error handling for the Vetrolisci backend.

pub mod error_code;

pub use error_code::ErrorCode;
