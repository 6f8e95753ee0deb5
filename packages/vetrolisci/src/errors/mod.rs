//! Error handling for the Vetrolisci engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
