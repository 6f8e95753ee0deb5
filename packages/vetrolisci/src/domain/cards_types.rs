//! Core card types: Card, Color, CardId.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type CardId = u16;

/// Card colors. `Multi` is the wildcard that matches every concrete color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Red,
    Yellow,
    Multi,
}

impl Color {
    /// Concrete colors in lexicographic order of their names.
    pub const CONCRETE: [Color; 4] = [Color::Blue, Color::Green, Color::Red, Color::Yellow];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Multi => "multi",
        }
    }

    pub const fn is_multi(&self) -> bool {
        matches!(self, Color::Multi)
    }

    /// Color matching used by special-card bonuses: multi matches everything.
    pub fn matches(&self, other: Color) -> bool {
        self.is_multi() || other.is_multi() || *self == other
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog entry.
///
/// `scoring` encodes symbols: positive values count spirals, negative values
/// count crosses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: u8,
    pub color: Color,
    pub scoring: i8,
    pub special: bool,
}

impl Card {
    pub const fn new(id: CardId, value: u8, color: Color, scoring: i8, special: bool) -> Self {
        Self {
            id,
            value,
            color,
            scoring,
            special,
        }
    }

    /// Grid slot this card naturally lands on (`value - 1`).
    pub fn natural_slot(&self) -> usize {
        usize::from(self.value.saturating_sub(1))
    }

    pub fn spirals(&self) -> u8 {
        self.scoring.max(0).unsigned_abs()
    }

    pub fn crosses(&self) -> u8 {
        self.scoring.min(0).unsigned_abs()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}-{}", self.id, self.value, self.color)
    }
}
