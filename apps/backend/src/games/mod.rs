//! Games the server can host.
//!
//! The set is closed: a room holds an [`ActiveGame`], and adding a game means
//! adding a variant to [`GameKind`] and [`ActiveGame`].

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use vetrolisci::domain::{
    ActionResult, CardId, GameSession, GameSnapshot, PlacementChoice, PlayerIndex,
};
use vetrolisci::errors::DomainError;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[default]
    Vetrolisci,
}

impl GameKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameKind::Vetrolisci => "vetrolisci",
        }
    }
}

/// A player intent, already bound to a seat by the transport.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayerAction {
    Pick {
        card_id: CardId,
        choice: Option<PlacementChoice>,
    },
    ResolveChoice {
        card_id: CardId,
        choice: PlacementChoice,
    },
}

#[derive(Debug)]
pub enum ActiveGame {
    Vetrolisci(GameSession),
}

impl ActiveGame {
    pub fn start(kind: GameKind, rng: ChaCha8Rng) -> Result<Self, DomainError> {
        match kind {
            GameKind::Vetrolisci => Ok(ActiveGame::Vetrolisci(GameSession::new(rng)?)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Vetrolisci(_) => GameKind::Vetrolisci,
        }
    }

    pub fn apply(
        &mut self,
        seat: PlayerIndex,
        action: PlayerAction,
    ) -> Result<ActionResult, DomainError> {
        match self {
            ActiveGame::Vetrolisci(session) => match action {
                PlayerAction::Pick { card_id, choice } => session.pick(seat, card_id, choice),
                PlayerAction::ResolveChoice { card_id, choice } => {
                    session.resolve_choice(seat, card_id, choice)
                }
            },
        }
    }

    pub fn snapshot(&self, viewer: Option<PlayerIndex>) -> GameSnapshot {
        match self {
            ActiveGame::Vetrolisci(session) => GameSnapshot::of(session, viewer),
        }
    }

    pub fn abandon(&mut self) {
        match self {
            ActiveGame::Vetrolisci(session) => session.abandon(),
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            ActiveGame::Vetrolisci(session) => session.is_over(),
        }
    }
}
