//! A player's private 3×3 grid.
//!
//! Slots are addressed 0..=8 row-major. A face-up card always sits on its
//! natural slot (`value - 1`); face-down cards may sit anywhere.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;

pub const GRID_SIDE: usize = 3;
pub const GRID_SIZE: usize = GRID_SIDE * GRID_SIDE;

/// A card placed into a grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    #[serde(flatten)]
    pub card: Card,
    pub face_up: bool,
    pub validated: bool,
    /// Card buried underneath. Display only, never scored.
    #[serde(skip)]
    pub stacked_card: Option<Card>,
}

impl GridCell {
    pub fn face_up(card: Card) -> Self {
        Self {
            card,
            face_up: true,
            validated: false,
            stacked_card: None,
        }
    }

    pub fn face_down(card: Card) -> Self {
        Self {
            card,
            face_up: false,
            validated: false,
            stacked_card: None,
        }
    }

    /// Face-up card that has been proven; locked until the round ends.
    pub fn is_locked(&self) -> bool {
        self.face_up && self.validated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGrid {
    slots: [Option<GridCell>; GRID_SIZE],
}

impl PlayerGrid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: [Option<GridCell>; GRID_SIZE]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<GridCell>; GRID_SIZE] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&GridCell> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn is_empty_slot(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(None))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.empty_slots().next()
    }

    pub fn face_up_cells(&self) -> impl Iterator<Item = (usize, &GridCell)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().filter(|c| c.face_up).map(|c| (i, c)))
    }

    /// Whether `value` is already proven on this grid.
    pub fn has_validated(&self, value: u8) -> bool {
        self.face_up_cells()
            .any(|(_, cell)| cell.validated && cell.card.value == value)
    }

    /// Every card resting in the grid, buried ones included.
    pub fn all_cards(&self) -> Vec<Card> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|cell| std::iter::once(cell.card).chain(cell.stacked_card))
            .collect()
    }

    /// Remove every card, returning them (buried ones included).
    pub fn clear(&mut self) -> Vec<Card> {
        let cards = self.all_cards();
        self.slots = Default::default();
        cards
    }

    pub(crate) fn set(&mut self, slot: usize, cell: GridCell) {
        self.slots[slot] = Some(cell);
    }
}

/// Orthogonal neighbors of a slot on the 3×3 grid.
pub fn neighbors(slot: usize) -> impl Iterator<Item = usize> {
    let row = slot / GRID_SIDE;
    let col = slot % GRID_SIDE;
    let up = row.checked_sub(1).map(|r| r * GRID_SIDE + col);
    let down = (row + 1 < GRID_SIDE).then(|| (row + 1) * GRID_SIDE + col);
    let left = col.checked_sub(1).map(|c| row * GRID_SIDE + c);
    let right = (col + 1 < GRID_SIDE).then(|| row * GRID_SIDE + col + 1);
    [up, down, left, right].into_iter().flatten()
}
