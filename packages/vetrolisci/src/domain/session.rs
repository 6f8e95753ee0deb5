//! Round and turn orchestration for a `GameSession`.
//!
//! Every public operation validates first and commits last, so an `Err`
//! leaves the session exactly as it was.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::domain::cards_types::{Card, CardId};
use crate::domain::dealing::{deal_turn_cards, fresh_deck, reshuffle, TURN_SIZE};
use crate::domain::draft::{pick_order_for, DraftState};
use crate::domain::eligibility::{can_pick, PickEligibility};
use crate::domain::events::{ActionResult, DiscardReason, GameEvent, PickOutcome};
use crate::domain::grid::PlayerGrid;
use crate::domain::placement::{
    apply_placement, determine_placement_scenario, Placement, PlacementChoice, PlacementScenario,
};
use crate::domain::scoring::{score_grid, RoundScore};
use crate::domain::state::{
    is_valid_player, ChoiceKind, GamePhase, GameSession, PendingChoice, PlayerIndex,
    RoundSummary, PLAYERS, ROUNDS,
};
use crate::errors::domain::{DomainError, ValidationKind};

impl GameSession {
    /// Start round 1 from a freshly shuffled catalog.
    pub fn new(mut rng: ChaCha8Rng) -> Result<Self, DomainError> {
        let deck = fresh_deck(&mut rng);
        Self::from_deck(deck, rng)
    }

    pub fn with_seed(seed: u64) -> Result<Self, DomainError> {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Start round 1 dealing from `deck` as given (top card first).
    ///
    /// `rng` drives the later inter-round reshuffles.
    pub fn from_deck(deck: Vec<Card>, rng: ChaCha8Rng) -> Result<Self, DomainError> {
        let (revealed, deck) = deal_turn_cards(&deck, TURN_SIZE)?;
        let draft = DraftState::new(revealed, pick_order_for(1, None));
        debug!(first_picker = draft.pick_order[0], "Game session created");
        Ok(Self {
            grids: Default::default(),
            current_round: 1,
            scores: [[0; ROUNDS as usize]; PLAYERS],
            player_turn_counts: [0; PLAYERS],
            last_picker: None,
            deck,
            draft,
            discard: Vec::new(),
            pending: None,
            phase: GamePhase::Draft,
            history: Vec::new(),
            winner: None,
            rng,
        })
    }

    /// Eligibility of `card_id` for `player` among the currently revealed cards.
    pub fn eligibility(
        &self,
        player: PlayerIndex,
        card_id: CardId,
    ) -> Result<PickEligibility, DomainError> {
        ensure_player(player)?;
        let card = self.draft.find_card(card_id)?;
        Ok(can_pick(&card, self.grid(player), &self.draft.revealed_cards))
    }

    /// Take a revealed card for `player` and place it.
    ///
    /// When the placement needs a decision and `choice` is `None`, the card is
    /// parked as pending and the outcome is `NeedsChoice`; the draft already
    /// counts the pick, but nobody may pick again until `resolve_choice`.
    pub fn pick(
        &mut self,
        player: PlayerIndex,
        card_id: CardId,
        choice: Option<PlacementChoice>,
    ) -> Result<ActionResult, DomainError> {
        self.ensure_active()?;
        ensure_player(player)?;
        if let Some(pending) = &self.pending {
            return Err(DomainError::validation(
                ValidationKind::ChoicePending,
                format!(
                    "Player {} must place card {} before the next pick",
                    pending.player, pending.card.id
                ),
            ));
        }
        self.draft.ensure_turn(player)?;
        let card = self.draft.find_card(card_id)?;

        let eligibility = can_pick(&card, self.grid(player), &self.draft.revealed_cards);
        if !eligibility.allowed {
            let reason = eligibility.reason.map(|r| r.as_str()).unwrap_or("not allowed");
            return Err(DomainError::validation(
                ValidationKind::IneligiblePick,
                format!("Card {card_id} cannot be picked: {reason}"),
            ));
        }

        let scenario = determine_placement_scenario(&card, self.grid(player));
        if let Some(kind) = choice_needed(scenario, self.grid(player)) {
            if choice.is_none() {
                self.draft.pick_card(player, card_id)?;
                self.pending = Some(PendingChoice { player, card, kind });
                debug!(player, card_id, ?kind, "Placement choice pending");
                return Ok(ActionResult::quiet(PickOutcome::NeedsChoice {
                    choice_kind: kind,
                    card,
                }));
            }
        }

        let mut grid = self.grid(player).clone();
        let placement = apply_placement(&mut grid, card, scenario, choice)?;
        self.draft.pick_card(player, card_id)?;
        self.grids[usize::from(player)] = grid;
        self.after_placement(player, placement)
    }

    /// Settle the pending placement for `player`.
    pub fn resolve_choice(
        &mut self,
        player: PlayerIndex,
        card_id: CardId,
        choice: PlacementChoice,
    ) -> Result<ActionResult, DomainError> {
        self.ensure_active()?;
        ensure_player(player)?;
        let pending = self.pending.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidPlacementChoice,
                "No placement choice is pending",
            )
        })?;
        if pending.player != player {
            return Err(DomainError::validation(
                ValidationKind::WrongTurn,
                format!(
                    "Placement choice belongs to player {}, got player {player}",
                    pending.player
                ),
            ));
        }
        if pending.card.id != card_id {
            return Err(DomainError::validation(
                ValidationKind::CardNotFound,
                format!("Card {card_id} is not awaiting placement"),
            ));
        }

        let mut grid = self.grid(player).clone();
        let placement = apply_placement(
            &mut grid,
            pending.card,
            pending.kind.scenario(),
            Some(choice),
        )?;
        self.grids[usize::from(player)] = grid;
        self.pending = None;
        self.after_placement(player, placement)
    }

    /// Mark the session dead after a player left. Nothing is rolled back.
    pub fn abandon(&mut self) {
        if self.phase == GamePhase::Draft {
            info!(round = self.current_round, "Game abandoned");
        }
        self.phase = GamePhase::Abandoned;
        self.pending = None;
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        match self.phase {
            GamePhase::Draft => Ok(()),
            phase => Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Game is no longer accepting actions ({phase:?})"),
            )),
        }
    }

    fn after_placement(
        &mut self,
        player: PlayerIndex,
        placement: Placement,
    ) -> Result<ActionResult, DomainError> {
        let outcome = match placement {
            Placement::Placed {
                slot,
                face_up,
                validated_slot,
            } => PickOutcome::Placed {
                slot,
                face_up,
                validated_slot,
                grid: self.grid(player).clone(),
            },
            Placement::Discarded { card } => {
                self.discard.push(card);
                debug!(player, card_id = card.id, "Card discarded, no empty slot");
                PickOutcome::Discarded {
                    card,
                    reason: DiscardReason::NoEmptySlot,
                }
            }
        };

        // The pick just made was this player's last of the turn.
        if self.draft.is_done_for(player) {
            self.player_turn_counts[usize::from(player)] += 1;
        }

        let events = if self.draft.is_complete() {
            self.finish_turn()?
        } else {
            Vec::new()
        };
        Ok(ActionResult { outcome, events })
    }

    /// A round may only end between turns with both grids full and both
    /// players on the same number of turns.
    fn round_should_end(&self) -> bool {
        self.draft.is_complete()
            && self.grids.iter().any(PlayerGrid::is_full)
            && self.player_turn_counts[0] == self.player_turn_counts[1]
    }

    fn finish_turn(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let last = self.draft.last_picker();
        self.last_picker = Some(last);

        if self.round_should_end() {
            return self.end_round();
        }
        if self.deck.len() < TURN_SIZE {
            warn!(
                round = self.current_round,
                remaining = self.deck.len(),
                "Deck exhausted, ending round early"
            );
            return self.end_round();
        }

        self.deal_turn()?;
        let current_picker = self.draft.pick_order[0];
        info!(
            round = self.current_round,
            current_picker,
            turns = ?self.player_turn_counts,
            "Turn advanced"
        );
        Ok(vec![GameEvent::TurnAdvanced {
            current_picker,
            draft: self.draft.clone(),
        }])
    }

    fn deal_turn(&mut self) -> Result<(), DomainError> {
        let (revealed, remainder) = deal_turn_cards(&self.deck, TURN_SIZE)?;
        self.deck = remainder;
        self.draft = DraftState::new(
            revealed,
            pick_order_for(self.current_round, self.last_picker),
        );
        Ok(())
    }

    fn end_round(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let round = self.current_round;
        let round_index = round - 1;
        let scores: [RoundScore; PLAYERS] = [
            score_grid(&self.grids[0], round_index),
            score_grid(&self.grids[1], round_index),
        ];
        for (player, score) in scores.iter().enumerate() {
            self.scores[player][usize::from(round_index)] = score.total;
        }
        self.history.push(RoundSummary {
            round,
            scores: scores.clone(),
        });
        info!(
            round,
            p0 = scores[0].total,
            p1 = scores[1].total,
            "Round complete"
        );

        if round >= ROUNDS {
            let final_scores = self.total_scores();
            self.winner = winner_of(final_scores);
            self.phase = GamePhase::Finished;
            info!(?final_scores, winner = ?self.winner, "Game complete");
            return Ok(vec![
                GameEvent::RoundComplete {
                    round,
                    scores,
                    next_round: None,
                },
                GameEvent::GameComplete {
                    final_scores,
                    winner: self.winner,
                },
            ]);
        }

        self.start_next_round()?;
        Ok(vec![GameEvent::RoundComplete {
            round,
            scores,
            next_round: Some(self.current_round),
        }])
    }

    fn start_next_round(&mut self) -> Result<(), DomainError> {
        let mut collected: Vec<Card> = Vec::new();
        for grid in self.grids.iter_mut() {
            collected.extend(grid.clear());
        }
        collected.append(&mut self.discard);
        collected.append(&mut self.draft.revealed_cards);

        let remainder = std::mem::take(&mut self.deck);
        self.deck = reshuffle(remainder, collected, &mut self.rng);
        self.current_round += 1;
        self.player_turn_counts = [0; PLAYERS];
        self.last_picker = None;
        self.deal_turn()?;
        debug!(
            round = self.current_round,
            deck = self.deck.len(),
            first_picker = self.draft.pick_order[0],
            "Round started"
        );
        Ok(())
    }
}

fn ensure_player(player: PlayerIndex) -> Result<(), DomainError> {
    if is_valid_player(player) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::WrongTurn,
            format!("Unknown player {player}"),
        ))
    }
}

/// Which decision, if any, the player owes for `scenario` on `grid`.
fn choice_needed(scenario: PlacementScenario, grid: &PlayerGrid) -> Option<ChoiceKind> {
    match scenario {
        PlacementScenario::EmptyOrFaceDown => None,
        PlacementScenario::Duplicate => Some(ChoiceKind::Duplicate),
        PlacementScenario::AlreadyValidated => grid
            .first_empty()
            .map(|_| ChoiceKind::AlreadyValidated),
    }
}

/// Higher total wins; equal totals are a draw.
pub fn winner_of(final_scores: [i32; PLAYERS]) -> Option<PlayerIndex> {
    match final_scores[0].cmp(&final_scores[1]) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    }
}
