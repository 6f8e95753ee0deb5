//! Game session container and player/phase types.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::draft::DraftState;
use crate::domain::grid::PlayerGrid;
use crate::domain::placement::PlacementScenario;
use crate::domain::scoring::RoundScore;

/// Player index: 0 or 1.
pub type PlayerIndex = u8;

pub const PLAYERS: usize = 2;
pub const ROUNDS: u8 = 3;

/// The opponent of `player`.
#[inline]
pub fn other_player(player: PlayerIndex) -> PlayerIndex {
    player ^ 1
}

#[inline]
pub fn is_valid_player(player: PlayerIndex) -> bool {
    usize::from(player) < PLAYERS
}

/// Overall game progression. Scoring happens inside the action that ends a
/// round and is never observable as a resting phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Draft,
    Finished,
    /// A player left mid-game; the session only awaits teardown.
    Abandoned,
}

/// Which decision a pending placement is waiting on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    Duplicate,
    AlreadyValidated,
}

impl ChoiceKind {
    pub fn scenario(&self) -> PlacementScenario {
        match self {
            ChoiceKind::Duplicate => PlacementScenario::Duplicate,
            ChoiceKind::AlreadyValidated => PlacementScenario::AlreadyValidated,
        }
    }
}

/// A picked card waiting for the picker's placement decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChoice {
    pub player: PlayerIndex,
    pub card: Card,
    pub kind: ChoiceKind,
}

/// Scores recorded at the end of one round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round: u8,
    pub scores: [RoundScore; PLAYERS],
}

/// Entire authoritative state of one two-player game.
///
/// Mutated only through the operations in `session.rs`; every failed
/// operation leaves it untouched.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) grids: [PlayerGrid; PLAYERS],
    /// 1-based, 1..=3.
    pub(crate) current_round: u8,
    /// Per-player round totals, indexed by 0-based round.
    pub(crate) scores: [[i32; ROUNDS as usize]; PLAYERS],
    /// 4-card turns each player has finished picking in this round.
    pub(crate) player_turn_counts: [u32; PLAYERS],
    /// Final picker of the previous turn, `None` at round start.
    pub(crate) last_picker: Option<PlayerIndex>,
    pub(crate) deck: Vec<Card>,
    pub(crate) draft: DraftState,
    /// Cards discarded this round; back in the deck at the next reshuffle.
    pub(crate) discard: Vec<Card>,
    pub(crate) pending: Option<PendingChoice>,
    pub(crate) phase: GamePhase,
    pub(crate) history: Vec<RoundSummary>,
    pub(crate) winner: Option<PlayerIndex>,
    pub(crate) rng: ChaCha8Rng,
}

impl GameSession {
    /// Grid of `player`.
    ///
    /// # Panics
    ///
    /// When `player` is not a seat (`player >= PLAYERS`). Use
    /// [`GameSession::try_grid`] for unchecked input.
    pub fn grid(&self, player: PlayerIndex) -> &PlayerGrid {
        &self.grids[usize::from(player)]
    }

    pub fn try_grid(&self, player: PlayerIndex) -> Option<&PlayerGrid> {
        self.grids.get(usize::from(player))
    }

    pub fn grids(&self) -> &[PlayerGrid; PLAYERS] {
        &self.grids
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn scores(&self) -> &[[i32; ROUNDS as usize]; PLAYERS] {
        &self.scores
    }

    /// Summed score per player over the rounds played so far.
    pub fn total_scores(&self) -> [i32; PLAYERS] {
        [self.scores[0].iter().sum(), self.scores[1].iter().sum()]
    }

    pub fn player_turn_counts(&self) -> [u32; PLAYERS] {
        self.player_turn_counts
    }

    pub fn last_picker(&self) -> Option<PlayerIndex> {
        self.last_picker
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    pub fn pending(&self) -> Option<&PendingChoice> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    /// Winner once finished; `None` on a draw or while in progress.
    pub fn winner(&self) -> Option<PlayerIndex> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Finished | GamePhase::Abandoned)
    }

    /// Player expected to act next: the pending chooser, else the current picker.
    pub fn to_act(&self) -> Option<PlayerIndex> {
        if self.phase != GamePhase::Draft {
            return None;
        }
        match &self.pending {
            Some(pending) => Some(pending.player),
            None => self.draft.current_picker(),
        }
    }

    /// Every card the session currently holds, wherever it rests.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.draft.revealed_cards.len()
            + self.discard.len()
            + usize::from(self.pending.is_some())
            + self.grids.iter().map(|g| g.all_cards().len()).sum::<usize>()
    }
}
