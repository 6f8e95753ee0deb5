//! Read-only, serializable view of a session for clients.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, CardId};
use crate::domain::draft::PickOrder;
use crate::domain::eligibility::{can_pick, PickReason};
use crate::domain::grid::PlayerGrid;
use crate::domain::state::{
    ChoiceKind, GamePhase, GameSession, PlayerIndex, PLAYERS, ROUNDS,
};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub revealed_cards: Vec<Card>,
    pub pick_order: PickOrder,
    pub current_picker: Option<PlayerIndex>,
    pub completed_picks: usize,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingView {
    pub player: PlayerIndex,
    pub card: Card,
    pub choice_kind: ChoiceKind,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEligibility {
    pub card_id: CardId,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PickReason>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub round: u8,
    pub phase: GamePhase,
    pub scores: [[i32; ROUNDS as usize]; PLAYERS],
    pub total_scores: [i32; PLAYERS],
    pub turn_counts: [u32; PLAYERS],
    pub grids: [PlayerGrid; PLAYERS],
    pub draft: DraftView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingView>,
    pub to_act: Option<PlayerIndex>,
    pub winner: Option<PlayerIndex>,
    pub deck_remaining: usize,
    pub discarded: usize,
    /// Seat this snapshot was rendered for; spectators get `None`.
    pub viewer: Option<PlayerIndex>,
    /// Pick eligibility of each revealed card for `viewer`.
    pub eligibility: Vec<CardEligibility>,
}

impl GameSnapshot {
    /// View of `session` for `viewer`; an unknown seat gets the spectator view.
    pub fn of(session: &GameSession, viewer: Option<PlayerIndex>) -> Self {
        let draft = session.draft();
        let viewer_grid = viewer.and_then(|seat| session.try_grid(seat));
        let viewer = viewer_grid.and(viewer);
        let eligibility = match viewer_grid {
            Some(grid) if session.phase() == GamePhase::Draft => draft
                .revealed_cards
                .iter()
                .map(|card| {
                    let e = can_pick(card, grid, &draft.revealed_cards);
                    CardEligibility {
                        card_id: card.id,
                        allowed: e.allowed,
                        reason: e.reason,
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            round: session.current_round(),
            phase: session.phase(),
            scores: *session.scores(),
            total_scores: session.total_scores(),
            turn_counts: session.player_turn_counts(),
            grids: session.grids().clone(),
            draft: DraftView {
                revealed_cards: draft.revealed_cards.clone(),
                pick_order: draft.pick_order,
                current_picker: draft.current_picker(),
                completed_picks: draft.completed_picks,
            },
            pending: session.pending().map(|p| PendingView {
                player: p.player,
                card: p.card,
                choice_kind: p.kind,
            }),
            to_act: session.to_act(),
            winner: session.winner(),
            deck_remaining: session.deck().len(),
            discarded: session.discard().len(),
            viewer,
            eligibility,
        }
    }
}
