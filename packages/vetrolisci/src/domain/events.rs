//! Outcomes returned to the acting player and events broadcast to both.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::draft::DraftState;
use crate::domain::grid::PlayerGrid;
use crate::domain::scoring::RoundScore;
use crate::domain::state::{ChoiceKind, PlayerIndex, PLAYERS};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    NoEmptySlot,
}

/// What happened to the card the player just picked or placed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PickOutcome {
    #[serde(rename_all = "camelCase")]
    Placed {
        slot: usize,
        face_up: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        validated_slot: Option<usize>,
        grid: PlayerGrid,
    },
    #[serde(rename_all = "camelCase")]
    NeedsChoice { choice_kind: ChoiceKind, card: Card },
    Discarded { card: Card, reason: DiscardReason },
}

impl PickOutcome {
    pub fn needs_choice(&self) -> bool {
        matches!(self, PickOutcome::NeedsChoice { .. })
    }
}

/// Session-level transitions triggered by an action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    TurnAdvanced {
        current_picker: PlayerIndex,
        draft: DraftState,
    },
    #[serde(rename_all = "camelCase")]
    RoundComplete {
        round: u8,
        scores: [RoundScore; PLAYERS],
        next_round: Option<u8>,
    },
    #[serde(rename_all = "camelCase")]
    GameComplete {
        final_scores: [i32; PLAYERS],
        winner: Option<PlayerIndex>,
    },
}

/// Result of one accepted `pick` or `resolve_choice`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub outcome: PickOutcome,
    pub events: Vec<GameEvent>,
}

impl ActionResult {
    pub(crate) fn quiet(outcome: PickOutcome) -> Self {
        Self {
            outcome,
            events: Vec::new(),
        }
    }
}
