//! Deck shuffling and turn dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards_types::Card;
use crate::domain::catalog::full_catalog;
use crate::errors::domain::DomainError;

/// Cards revealed per turn.
pub const TURN_SIZE: usize = 4;

/// Uniform random permutation (Fisher-Yates) driven by the caller's RNG.
pub fn shuffle<R: Rng + ?Sized>(mut cards: Vec<Card>, rng: &mut R) -> Vec<Card> {
    cards.shuffle(rng);
    cards
}

/// Shuffled full catalog for a fresh game.
pub fn fresh_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    shuffle(full_catalog(), rng)
}

/// Deal `n` cards off the top of `deck`.
///
/// Returns `(turn, remainder)`. Fails with `InsufficientCards` rather than
/// under-dealing.
pub fn deal_turn_cards(deck: &[Card], n: usize) -> Result<(Vec<Card>, Vec<Card>), DomainError> {
    if deck.len() < n {
        return Err(DomainError::insufficient_cards(n, deck.len()));
    }
    let (turn, remainder) = deck.split_at(n);
    Ok((turn.to_vec(), remainder.to_vec()))
}

/// Merge collected cards back into the undealt remainder and shuffle.
pub fn reshuffle<R: Rng + ?Sized>(
    remainder: Vec<Card>,
    collected: impl IntoIterator<Item = Card>,
    rng: &mut R,
) -> Vec<Card> {
    let mut deck = remainder;
    deck.extend(collected);
    shuffle(deck, rng)
}
