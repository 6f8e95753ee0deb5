// Proptest generators and random drivers for engine tests.

use proptest::prelude::*;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, Color};
use crate::domain::catalog::CATALOG;
use crate::domain::events::{ActionResult, PickOutcome};
use crate::domain::grid::{GridCell, PlayerGrid, GRID_SIZE};
use crate::domain::placement::{DuplicateChoice, PlacementChoice};
use crate::domain::state::{ChoiceKind, GameSession};
use crate::errors::domain::DomainError;

/// Any card from the catalog.
pub fn card() -> impl Strategy<Value = Card> {
    (0..CATALOG.len()).prop_map(|i| CATALOG[i])
}

/// A grid obeying the placement invariants: face-up cards on their natural
/// slot, face-down cards anywhere.
pub fn grid() -> impl Strategy<Value = PlayerGrid> {
    let cell = proptest::option::of((card(), any::<bool>(), any::<bool>()));
    proptest::collection::vec(cell, GRID_SIZE).prop_map(|cells| {
        let mut slots: [Option<GridCell>; GRID_SIZE] = Default::default();
        for (slot, entry) in cells.into_iter().enumerate() {
            let Some((card, face_up, validated)) = entry else {
                continue;
            };
            slots[slot] = if face_up && card.natural_slot() == slot {
                Some(GridCell {
                    validated,
                    ..GridCell::face_up(card)
                })
            } else {
                Some(GridCell::face_down(card))
            };
        }
        PlayerGrid::from_slots(slots)
    })
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Catalog card with the given value and color.
pub fn catalog_card(value: u8, color: Color) -> Card {
    CATALOG
        .iter()
        .copied()
        .find(|c| c.value == value && c.color == color)
        .expect("catalog card")
}

/// Answer a pending placement at random.
pub fn random_choice(
    session: &GameSession,
    kind: ChoiceKind,
    rng: &mut ChaCha8Rng,
) -> PlacementChoice {
    match kind {
        ChoiceKind::Duplicate => {
            if rng.random_bool(0.5) {
                PlacementChoice::Duplicate(DuplicateChoice::KeepExisting)
            } else {
                PlacementChoice::Duplicate(DuplicateChoice::KeepNew)
            }
        }
        ChoiceKind::AlreadyValidated => {
            let player = session.pending().expect("pending choice").player;
            let empty: Vec<usize> = session.grid(player).empty_slots().collect();
            let slot = empty.choose(rng).copied().expect("an empty slot");
            PlacementChoice::Slot(slot as u8)
        }
    }
}

/// Make one legal move for whoever is to act: a random eligible pick, then a
/// random answer if the placement asks for one.
pub fn random_step(
    session: &mut GameSession,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<ActionResult>, DomainError> {
    let player = session.to_act().expect("someone to act");
    let candidates: Vec<u16> = session
        .draft()
        .revealed_cards
        .iter()
        .filter(|c| session.eligibility(player, c.id).map(|e| e.allowed).unwrap_or(false))
        .map(|c| c.id)
        .collect();
    let card_id = *candidates.choose(rng).expect("an eligible card");

    let first = session.pick(player, card_id, None)?;
    let mut results = Vec::new();
    if let PickOutcome::NeedsChoice { choice_kind, card } = first.outcome.clone() {
        results.push(first);
        let choice = random_choice(session, choice_kind, rng);
        results.push(session.resolve_choice(player, card.id, choice)?);
    } else {
        results.push(first);
    }
    Ok(results)
}
