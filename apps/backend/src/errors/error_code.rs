//! Error codes for the Vetrolisci backend API.
//!
//! Every code is SCREAMING_SNAKE_CASE and appears verbatim in problem+json
//! bodies and websocket `error` messages. Add new codes here; never pass
//! ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    InvalidGameId,
    BadRequest,
    BadProtocol,
    HelloRequired,
    NotSeated,

    // Engine rule violations
    WrongTurn,
    CardNotFound,
    IneligiblePick,
    InvalidPlacementChoice,
    ChoicePending,
    PhaseMismatch,
    ValidationError,

    // Resource state
    GameNotFound,
    GameNotStarted,
    RoomFull,

    // System
    InsufficientCards,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::BadRequest => "BAD_REQUEST",
            Self::BadProtocol => "BAD_PROTOCOL",
            Self::HelloRequired => "HELLO_REQUIRED",
            Self::NotSeated => "NOT_SEATED",

            Self::WrongTurn => "WRONG_TURN",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::IneligiblePick => "INELIGIBLE_PICK",
            Self::InvalidPlacementChoice => "INVALID_PLACEMENT_CHOICE",
            Self::ChoicePending => "CHOICE_PENDING",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::RoomFull => "ROOM_FULL",

            Self::InsufficientCards => "INSUFFICIENT_CARDS",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
