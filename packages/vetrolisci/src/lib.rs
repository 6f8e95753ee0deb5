//! Vetrolisci: a two-player card-drafting game engine.
//!
//! The engine is synchronous and holds no shared state; callers serialise
//! actions per [`GameSession`].

pub mod domain;
pub mod errors;

pub use domain::{
    ActionResult, Card, CardId, ChoiceKind, Color, DuplicateChoice, GameEvent, GamePhase,
    GameSession, GameSnapshot, PickOutcome, PlacementChoice, PlayerIndex,
};
pub use errors::{DomainError, ValidationKind};
