//! Placement resolver: decides where a freshly picked card lands and
//! mutates the picker's grid.
//!
//! Exactly one scenario applies, checked in priority order:
//! 1. `AlreadyValidated` - the value is proven; the card goes face-down on any
//!    empty slot, or is discarded when none is left.
//! 2. `Duplicate` - the value is face-up but unproven; the player keeps one of
//!    the two face-up and buries the other, validating the slot.
//! 3. `EmptyOrFaceDown` - natural slot is empty (face-up, unproven) or holds a
//!    face-down card (new card on top, validated).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards_types::Card;
use crate::domain::grid::{GridCell, PlayerGrid, GRID_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementScenario {
    AlreadyValidated,
    Duplicate,
    EmptyOrFaceDown,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateChoice {
    /// Existing face-up card stays on top; the new one goes underneath.
    KeepExisting,
    /// New card goes face-up on top; the existing one goes underneath.
    KeepNew,
}

/// Client answer to a pending placement: `"keep-existing"`, `"keep-new"` or
/// a slot index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlacementChoice {
    Duplicate(DuplicateChoice),
    Slot(u8),
}

/// Result of applying a placement to a grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Placement {
    Placed {
        slot: usize,
        face_up: bool,
        validated_slot: Option<usize>,
    },
    /// Already-validated value with no empty slot left.
    Discarded { card: Card },
}

pub fn determine_placement_scenario(card: &Card, grid: &PlayerGrid) -> PlacementScenario {
    if grid.has_validated(card.value) {
        PlacementScenario::AlreadyValidated
    } else if face_up_slot_for(grid, card.value).is_some() {
        PlacementScenario::Duplicate
    } else {
        PlacementScenario::EmptyOrFaceDown
    }
}

/// Apply `scenario` for `card`. Nothing is mutated when this returns `Err`.
pub fn apply_placement(
    grid: &mut PlayerGrid,
    card: Card,
    scenario: PlacementScenario,
    choice: Option<PlacementChoice>,
) -> Result<Placement, DomainError> {
    match (scenario, choice) {
        (PlacementScenario::EmptyOrFaceDown, None) => Ok(place_on_natural_slot(grid, card)),
        (PlacementScenario::EmptyOrFaceDown, Some(_)) => Err(invalid_choice(format!(
            "Card {} goes to its natural slot and takes no placement choice",
            card.id
        ))),
        (PlacementScenario::Duplicate, Some(PlacementChoice::Duplicate(keep))) => {
            place_duplicate(grid, card, keep)
        }
        (PlacementScenario::Duplicate, _) => Err(invalid_choice(
            "Duplicate placement requires keep-existing or keep-new",
        )),
        (PlacementScenario::AlreadyValidated, None) => place_already_validated(grid, card, None),
        (PlacementScenario::AlreadyValidated, Some(PlacementChoice::Slot(slot))) => {
            place_already_validated(grid, card, Some(usize::from(slot)))
        }
        (PlacementScenario::AlreadyValidated, Some(PlacementChoice::Duplicate(_))) => Err(
            invalid_choice("Already-validated placement requires a target slot"),
        ),
    }
}

/// Empty natural slot: face-up, unproven. Face-down natural slot: new card on
/// top, validated.
pub fn place_on_natural_slot(grid: &mut PlayerGrid, card: Card) -> Placement {
    let slot = card.natural_slot();
    let placement = match grid.get(slot).copied() {
        Some(buried) => {
            debug_assert!(!buried.face_up, "natural slot holds a face-up card");
            grid.set(
                slot,
                GridCell {
                    card,
                    face_up: true,
                    validated: true,
                    stacked_card: Some(buried.card),
                },
            );
            Placement::Placed {
                slot,
                face_up: true,
                validated_slot: Some(slot),
            }
        }
        None => {
            grid.set(slot, GridCell::face_up(card));
            Placement::Placed {
                slot,
                face_up: true,
                validated_slot: None,
            }
        }
    };
    debug!(card_id = card.id, slot, "Placed on natural slot");
    placement
}

pub fn place_duplicate(
    grid: &mut PlayerGrid,
    card: Card,
    keep: DuplicateChoice,
) -> Result<Placement, DomainError> {
    let slot = face_up_slot_for(grid, card.value)
        .ok_or_else(|| invalid_choice(format!("No face-up {} to pair with", card.value)))?;
    let existing = grid
        .get(slot)
        .copied()
        .ok_or_else(|| invalid_choice("Duplicate slot is empty"))?;

    let (top, under) = match keep {
        DuplicateChoice::KeepExisting => (existing.card, card),
        DuplicateChoice::KeepNew => (card, existing.card),
    };
    grid.set(
        slot,
        GridCell {
            card: top,
            face_up: true,
            validated: true,
            stacked_card: Some(under),
        },
    );

    debug!(card_id = card.id, slot, ?keep, "Duplicate resolved");
    Ok(Placement::Placed {
        slot,
        face_up: true,
        validated_slot: Some(slot),
    })
}

/// Face-down on `target` (or the first empty slot). Discards when the grid
/// has no empty slot.
pub fn place_already_validated(
    grid: &mut PlayerGrid,
    card: Card,
    target: Option<usize>,
) -> Result<Placement, DomainError> {
    let Some(first_empty) = grid.first_empty() else {
        debug!(card_id = card.id, "No empty slot, card discarded");
        return Ok(Placement::Discarded { card });
    };

    let slot = match target {
        None => first_empty,
        Some(slot) if slot >= GRID_SIZE => {
            return Err(invalid_choice(format!(
                "Slot {slot} is out of range 0..{GRID_SIZE}"
            )))
        }
        Some(slot) if !grid.is_empty_slot(slot) => {
            return Err(invalid_choice(format!("Slot {slot} is not empty")))
        }
        Some(slot) => slot,
    };

    grid.set(slot, GridCell::face_down(card));
    debug!(card_id = card.id, slot, "Placed face-down");
    Ok(Placement::Placed {
        slot,
        face_up: false,
        validated_slot: None,
    })
}

fn face_up_slot_for(grid: &PlayerGrid, value: u8) -> Option<usize> {
    grid.face_up_cells()
        .find(|(_, cell)| cell.card.value == value)
        .map(|(slot, _)| slot)
}

fn invalid_choice(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidPlacementChoice, detail)
}
