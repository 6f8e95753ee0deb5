//! Pick-eligibility filter: forbids re-picking an already proven number
//! while an alternative pick exists.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::grid::PlayerGrid;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickReason {
    /// Forbidden: the value is already validated on the picker's grid.
    ValueAlreadyValidated,
    /// Allowed by exception: every revealed card hits the restriction.
    AllCardsValidated,
}

impl PickReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PickReason::ValueAlreadyValidated => "value_already_validated",
            PickReason::AllCardsValidated => "all_cards_validated",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PickEligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PickReason>,
}

impl PickEligibility {
    const ALLOWED: Self = Self {
        allowed: true,
        reason: None,
    };
}

/// Decide whether `card` may be picked by the owner of `grid` from `revealed`.
pub fn can_pick(card: &Card, grid: &PlayerGrid, revealed: &[Card]) -> PickEligibility {
    if !grid.has_validated(card.value) {
        return PickEligibility::ALLOWED;
    }

    let no_alternative = revealed.iter().all(|c| grid.has_validated(c.value));
    if no_alternative {
        PickEligibility {
            allowed: true,
            reason: Some(PickReason::AllCardsValidated),
        }
    } else {
        PickEligibility {
            allowed: false,
            reason: Some(PickReason::ValueAlreadyValidated),
        }
    }
}
