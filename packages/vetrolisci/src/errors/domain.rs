//! Domain-level error type returned by every engine operation.
//!
//! Errors are local validation failures: the session is never mutated when an
//! operation returns `Err`, and none of them is fatal to the game.

use thiserror::Error;

/// Validation kinds, one per rejected-intent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Action from a player who is not the current picker.
    WrongTurn,
    /// Card id is not among the revealed cards (stale or duplicate request).
    CardNotFound,
    /// Pick would voluntarily re-use an already validated number.
    IneligiblePick,
    /// Malformed, out-of-range or mismatched placement choice.
    InvalidPlacementChoice,
    /// A placement choice must be resolved before any further pick.
    ChoicePending,
    /// Session is not in a phase that accepts this action.
    PhaseMismatch,
}

impl ValidationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::WrongTurn => "wrong_turn",
            ValidationKind::CardNotFound => "card_not_found",
            ValidationKind::IneligiblePick => "ineligible_pick",
            ValidationKind::InvalidPlacementChoice => "invalid_placement_choice",
            ValidationKind::ChoicePending => "choice_pending",
            ValidationKind::PhaseMismatch => "phase_mismatch",
        }
    }
}

/// Central engine error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Rejected player intent; nothing was mutated.
    #[error("validation error ({}): {detail}", kind.as_str())]
    Validation { kind: ValidationKind, detail: String },
    /// Deck cannot cover a full deal.
    #[error("insufficient cards: needed {needed}, {available} available")]
    InsufficientCards { needed: usize, available: usize },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn insufficient_cards(needed: usize, available: usize) -> Self {
        Self::InsufficientCards { needed, available }
    }

    /// Validation kind, if this is a validation failure.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation { kind, .. } => Some(*kind),
            DomainError::InsufficientCards { .. } => None,
        }
    }
}
