//! Pure Vetrolisci rules: no I/O, no clocks, no global RNG.

pub mod cards_types;
pub mod catalog;
pub mod dealing;
pub mod draft;
pub mod eligibility;
pub mod events;
pub mod grid;
pub mod placement;
pub mod scoring;
pub mod seed_derivation;
pub mod session;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_session;

pub use cards_types::{Card, CardId, Color};
pub use draft::{DraftPhase, DraftState, PickOrder};
pub use eligibility::{can_pick, PickEligibility, PickReason};
pub use events::{ActionResult, DiscardReason, GameEvent, PickOutcome};
pub use grid::{GridCell, PlayerGrid, GRID_SIZE};
pub use placement::{DuplicateChoice, PlacementChoice, PlacementScenario};
pub use scoring::{score_grid, RoundScore, ScoreBreakdown};
pub use seed_derivation::derive_session_seed;
pub use session::winner_of;
pub use snapshot::GameSnapshot;
pub use state::{other_player, ChoiceKind, GamePhase, GameSession, PlayerIndex, PLAYERS, ROUNDS};
