//! Draft state machine: reveal four cards, two players pick alternately.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards_types::{Card, CardId};
use crate::domain::dealing::TURN_SIZE;
use crate::domain::state::{other_player, PlayerIndex};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    Pick,
    /// Terminal; consumed immediately by the orchestrator.
    Complete,
}

pub type PickOrder = [PlayerIndex; TURN_SIZE];

/// One 4-card turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub revealed_cards: Vec<Card>,
    pub pick_order: PickOrder,
    pub current_pick_index: usize,
    pub completed_picks: usize,
    pub phase: DraftPhase,
}

impl DraftState {
    pub fn new(revealed_cards: Vec<Card>, pick_order: PickOrder) -> Self {
        Self {
            revealed_cards,
            pick_order,
            current_pick_index: 0,
            completed_picks: 0,
            phase: DraftPhase::Pick,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DraftPhase::Complete
    }

    /// Player expected to pick next, `None` once complete.
    pub fn current_picker(&self) -> Option<PlayerIndex> {
        match self.phase {
            DraftPhase::Pick => self.pick_order.get(self.current_pick_index).copied(),
            DraftPhase::Complete => None,
        }
    }

    /// Player holding the final pick of this turn.
    pub fn last_picker(&self) -> PlayerIndex {
        self.pick_order[TURN_SIZE - 1]
    }

    /// Whether `player` has no picks left in this turn.
    pub fn is_done_for(&self, player: PlayerIndex) -> bool {
        !self.pick_order[self.current_pick_index.min(TURN_SIZE)..].contains(&player)
    }

    pub fn ensure_turn(&self, player: PlayerIndex) -> Result<(), DomainError> {
        match self.current_picker() {
            Some(expected) if expected == player => Ok(()),
            Some(expected) => Err(DomainError::validation(
                ValidationKind::WrongTurn,
                format!("Not your turn to pick. Expected player {expected}, got player {player}"),
            )),
            None => Err(DomainError::validation(
                ValidationKind::WrongTurn,
                "All picks for this turn are done",
            )),
        }
    }

    pub fn find_card(&self, card_id: CardId) -> Result<Card, DomainError> {
        self.revealed_cards
            .iter()
            .copied()
            .find(|c| c.id == card_id)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::CardNotFound,
                    format!("Card {card_id} is not among the revealed cards"),
                )
            })
    }

    /// Take `card_id` for `player` and advance the pick index.
    ///
    /// The returned card is the picker's transient hand: it only drives the
    /// following placement.
    pub fn pick_card(&mut self, player: PlayerIndex, card_id: CardId) -> Result<Card, DomainError> {
        self.ensure_turn(player)?;
        let card = self.find_card(card_id)?;

        self.revealed_cards.retain(|c| c.id != card_id);
        self.current_pick_index += 1;
        self.completed_picks += 1;
        if self.completed_picks == TURN_SIZE {
            self.phase = DraftPhase::Complete;
        }

        debug!(
            player,
            card_id,
            completed_picks = self.completed_picks,
            "Card picked"
        );
        Ok(card)
    }
}

/// Order for the first turn of a round: odd rounds open with player 0.
pub fn opening_pick_order(round: u8) -> PickOrder {
    let first = if round % 2 == 1 { 0 } else { 1 };
    alternating_from(first)
}

/// Order for every later turn: last turn's final picker goes first.
pub fn pick_order_after(last_picker: PlayerIndex) -> PickOrder {
    alternating_from(last_picker)
}

pub fn pick_order_for(round: u8, last_picker: Option<PlayerIndex>) -> PickOrder {
    match last_picker {
        Some(p) => pick_order_after(p),
        None => opening_pick_order(round),
    }
}

fn alternating_from(first: PlayerIndex) -> PickOrder {
    let second = other_player(first);
    [first, second, first, second]
}
