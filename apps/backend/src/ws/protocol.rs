use serde::{Deserialize, Serialize};
use vetrolisci::domain::{
    CardId, DraftState, GameEvent, GameSnapshot, PickOutcome, PlacementChoice, PlayerIndex,
    RoundScore, PLAYERS,
};
use vetrolisci::errors::{DomainError, ValidationKind};

use crate::errors::ErrorCode;
use crate::games::{GameKind, PlayerAction};

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    Join,
    Pick {
        card_id: CardId,
        #[serde(default)]
        choice: Option<WireChoice>,
    },
    ResolveChoice {
        card_id: CardId,
        choice: WireChoice,
    },
}

/// Placement answer as sent by the client. Unrecognised values are kept so
/// they can be rejected in-band instead of failing the whole frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireChoice {
    Known(PlacementChoice),
    Unknown(serde_json::Value),
}

impl WireChoice {
    fn resolve(&self) -> Result<PlacementChoice, DomainError> {
        match self {
            WireChoice::Known(choice) => Ok(*choice),
            WireChoice::Unknown(raw) => Err(DomainError::validation(
                ValidationKind::InvalidPlacementChoice,
                format!("Unrecognised placement choice: {raw}"),
            )),
        }
    }
}

impl ClientMsg {
    /// Game intent carried by this message, if any.
    pub fn action(&self) -> Result<Option<PlayerAction>, DomainError> {
        let action = match self {
            ClientMsg::Pick { card_id, choice } => PlayerAction::Pick {
                card_id: *card_id,
                choice: choice.as_ref().map(WireChoice::resolve).transpose()?,
            },
            ClientMsg::ResolveChoice { card_id, choice } => PlayerAction::ResolveChoice {
                card_id: *card_id,
                choice: choice.resolve()?,
            },
            ClientMsg::Hello { .. } | ClientMsg::Join => return Ok(None),
        };
        Ok(Some(action))
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        conn_id: String,
    },
    Joined {
        game_id: i64,
        kind: GameKind,
        seat: PlayerIndex,
    },
    GameState {
        game_id: i64,
        game: GameSnapshot,
    },
    /// Result of the recipient's own action.
    Outcome {
        game_id: i64,
        seat: PlayerIndex,
        result: PickOutcome,
    },
    TurnAdvanced {
        game_id: i64,
        current_picker: PlayerIndex,
        draft: DraftState,
    },
    RoundComplete {
        game_id: i64,
        round: u8,
        scores: [RoundScore; PLAYERS],
        next_round: Option<u8>,
    },
    GameComplete {
        game_id: i64,
        final_scores: [i32; PLAYERS],
        winner: Option<PlayerIndex>,
    },
    OpponentLeft {
        game_id: i64,
        seat: PlayerIndex,
    },
    Error {
        code: String,
        message: String,
    },
}

impl ServerMsg {
    pub fn from_event(game_id: i64, event: GameEvent) -> Self {
        match event {
            GameEvent::TurnAdvanced {
                current_picker,
                draft,
            } => ServerMsg::TurnAdvanced {
                game_id,
                current_picker,
                draft,
            },
            GameEvent::RoundComplete {
                round,
                scores,
                next_round,
            } => ServerMsg::RoundComplete {
                game_id,
                round,
                scores,
                next_round,
            },
            GameEvent::GameComplete {
                final_scores,
                winner,
            } => ServerMsg::GameComplete {
                game_id,
                final_scores,
                winner,
            },
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code: code.as_str().to_string(),
            message: message.into(),
        }
    }
}
