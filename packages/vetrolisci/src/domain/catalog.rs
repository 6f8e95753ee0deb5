//! The static 70-card catalog.

use crate::domain::cards_types::{Card, CardId, Color};

pub const CATALOG_SIZE: usize = 70;

/// Every card in the game. Ids are unique and dense (1..=70).
pub static CATALOG: [Card; CATALOG_SIZE] = [
    // First set: every value in every concrete color.
    Card::new(1, 1, Color::Blue, 2, false),
    Card::new(2, 2, Color::Blue, 1, false),
    Card::new(3, 3, Color::Blue, 1, false),
    Card::new(4, 4, Color::Blue, 0, false),
    Card::new(5, 5, Color::Blue, 0, true),
    Card::new(6, 6, Color::Blue, 0, false),
    Card::new(7, 7, Color::Blue, -1, false),
    Card::new(8, 8, Color::Blue, -1, false),
    Card::new(9, 9, Color::Blue, -2, false),
    Card::new(10, 1, Color::Green, 2, false),
    Card::new(11, 2, Color::Green, 1, false),
    Card::new(12, 3, Color::Green, 1, false),
    Card::new(13, 4, Color::Green, 0, false),
    Card::new(14, 5, Color::Green, 0, true),
    Card::new(15, 6, Color::Green, 0, false),
    Card::new(16, 7, Color::Green, -1, false),
    Card::new(17, 8, Color::Green, -1, false),
    Card::new(18, 9, Color::Green, -2, false),
    Card::new(19, 1, Color::Yellow, 2, false),
    Card::new(20, 2, Color::Yellow, 1, false),
    Card::new(21, 3, Color::Yellow, 1, false),
    Card::new(22, 4, Color::Yellow, 0, false),
    Card::new(23, 5, Color::Yellow, 0, true),
    Card::new(24, 6, Color::Yellow, 0, false),
    Card::new(25, 7, Color::Yellow, -1, false),
    Card::new(26, 8, Color::Yellow, -1, false),
    Card::new(27, 9, Color::Yellow, -2, false),
    Card::new(28, 1, Color::Red, 2, false),
    Card::new(29, 2, Color::Red, 1, false),
    Card::new(30, 3, Color::Red, 1, false),
    Card::new(31, 4, Color::Red, 0, false),
    Card::new(32, 5, Color::Red, 0, true),
    Card::new(33, 6, Color::Red, 0, false),
    Card::new(34, 7, Color::Red, -1, false),
    Card::new(35, 8, Color::Red, -1, false),
    Card::new(36, 9, Color::Red, -2, false),
    // Second set: middle values only.
    Card::new(37, 2, Color::Blue, 1, false),
    Card::new(38, 3, Color::Blue, 0, false),
    Card::new(39, 4, Color::Blue, 0, false),
    Card::new(40, 5, Color::Blue, 0, false),
    Card::new(41, 6, Color::Blue, 0, false),
    Card::new(42, 7, Color::Blue, 0, false),
    Card::new(43, 8, Color::Blue, -1, false),
    Card::new(44, 2, Color::Green, 1, false),
    Card::new(45, 3, Color::Green, 0, false),
    Card::new(46, 4, Color::Green, 0, false),
    Card::new(47, 5, Color::Green, 0, false),
    Card::new(48, 6, Color::Green, 0, false),
    Card::new(49, 7, Color::Green, 0, false),
    Card::new(50, 8, Color::Green, -1, false),
    Card::new(51, 2, Color::Yellow, 1, false),
    Card::new(52, 3, Color::Yellow, 0, false),
    Card::new(53, 4, Color::Yellow, 0, false),
    Card::new(54, 5, Color::Yellow, 0, false),
    Card::new(55, 6, Color::Yellow, 0, false),
    Card::new(56, 7, Color::Yellow, 0, false),
    Card::new(57, 8, Color::Yellow, -1, false),
    Card::new(58, 2, Color::Red, 1, false),
    Card::new(59, 3, Color::Red, 0, false),
    Card::new(60, 4, Color::Red, 0, false),
    Card::new(61, 5, Color::Red, 0, false),
    Card::new(62, 6, Color::Red, 0, false),
    Card::new(63, 7, Color::Red, 0, false),
    Card::new(64, 8, Color::Red, -1, false),
    // Wildcards.
    Card::new(65, 1, Color::Multi, 1, false),
    Card::new(66, 3, Color::Multi, 0, false),
    Card::new(67, 5, Color::Multi, 0, true),
    Card::new(68, 5, Color::Multi, 0, false),
    Card::new(69, 7, Color::Multi, 0, false),
    Card::new(70, 9, Color::Multi, -1, false),
];

/// Fresh, unshuffled copy of the catalog.
pub fn full_catalog() -> Vec<Card> {
    CATALOG.to_vec()
}

pub fn card_by_id(id: CardId) -> Option<Card> {
    CATALOG.iter().copied().find(|card| card.id == id)
}
