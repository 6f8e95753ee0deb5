//! Scripted players. Agents only see what a client sees: their own
//! [`GameSnapshot`].

use clap::ValueEnum;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use vetrolisci::domain::{GridCell, PlayerIndex};
use vetrolisci::{Card, CardId, ChoiceKind, DuplicateChoice, GameSnapshot, PlacementChoice};

pub trait Agent {
    fn name(&self) -> &'static str;

    /// Card to take from the revealed cards; must be one the view allows.
    fn choose_pick(&mut self, view: &GameSnapshot) -> Option<CardId>;

    /// Answer for the viewer's pending placement.
    fn choose_placement(
        &mut self,
        view: &GameSnapshot,
        kind: ChoiceKind,
    ) -> Option<PlacementChoice>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Greedy,
}

impl AgentKind {
    pub fn build(self, rng: ChaCha8Rng) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent { rng }),
            AgentKind::Greedy => Box::new(GreedyAgent),
        }
    }
}

fn allowed_cards(view: &GameSnapshot) -> impl Iterator<Item = &Card> + '_ {
    view.draft.revealed_cards.iter().filter(|card| {
        view.eligibility
            .iter()
            .any(|e| e.card_id == card.id && e.allowed)
    })
}

fn own_cell(view: &GameSnapshot, slot: usize) -> Option<&GridCell> {
    let seat: PlayerIndex = view.viewer?;
    view.grids.get(usize::from(seat))?.get(slot)
}

fn empty_slots(view: &GameSnapshot) -> Vec<usize> {
    view.viewer
        .and_then(|seat| view.grids.get(usize::from(seat)))
        .map(|grid| grid.empty_slots().collect())
        .unwrap_or_default()
}

/// Uniformly random among legal moves.
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_pick(&mut self, view: &GameSnapshot) -> Option<CardId> {
        let cards: Vec<&Card> = allowed_cards(view).collect();
        cards.choose(&mut self.rng).map(|card| card.id)
    }

    fn choose_placement(
        &mut self,
        view: &GameSnapshot,
        kind: ChoiceKind,
    ) -> Option<PlacementChoice> {
        match kind {
            ChoiceKind::Duplicate => {
                let keep = if self.rng.random_bool(0.5) {
                    DuplicateChoice::KeepExisting
                } else {
                    DuplicateChoice::KeepNew
                };
                Some(PlacementChoice::Duplicate(keep))
            }
            ChoiceKind::AlreadyValidated => empty_slots(view)
                .choose(&mut self.rng)
                .map(|slot| PlacementChoice::Slot(*slot as u8)),
        }
    }
}

/// One-step lookahead: prefers picks that validate a slot, then fresh slots,
/// then high-value cards.
pub struct GreedyAgent;

impl GreedyAgent {
    fn pick_value(view: &GameSnapshot, card: &Card) -> i32 {
        let symbols = i32::from(card.scoring);
        let base = match own_cell(view, card.natural_slot()) {
            Some(cell) if cell.validated => 0,
            // Face-down or unproven face-up: this pick validates.
            Some(_) => 30,
            None => 20,
        };
        base + i32::from(card.value) + symbols * 2
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_pick(&mut self, view: &GameSnapshot) -> Option<CardId> {
        allowed_cards(view)
            .max_by_key(|card| (Self::pick_value(view, card), std::cmp::Reverse(card.id)))
            .map(|card| card.id)
    }

    fn choose_placement(
        &mut self,
        view: &GameSnapshot,
        kind: ChoiceKind,
    ) -> Option<PlacementChoice> {
        match kind {
            ChoiceKind::Duplicate => {
                let pending = view.pending.as_ref()?;
                let existing = own_cell(view, pending.card.natural_slot())?;
                let keep = if pending.card.scoring > existing.card.scoring {
                    DuplicateChoice::KeepNew
                } else {
                    DuplicateChoice::KeepExisting
                };
                Some(PlacementChoice::Duplicate(keep))
            }
            // Bury on the slot whose own number is least likely to turn up.
            ChoiceKind::AlreadyValidated => empty_slots(view)
                .into_iter()
                .max()
                .map(|slot| PlacementChoice::Slot(slot as u8)),
        }
    }
}
