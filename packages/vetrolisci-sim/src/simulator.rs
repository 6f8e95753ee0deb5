//! Plays whole games in memory, driving the engine exactly as a client
//! would: pick from the seat's own snapshot, answer any placement choice.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use vetrolisci::domain::{PLAYERS, ROUNDS};
use vetrolisci::{DomainError, GamePhase, GameSession, GameSnapshot, PickOutcome, PlayerIndex};

use crate::agents::Agent;

/// Hard stop for a game that fails to finish.
const ACTION_CAP: u32 = 1_000;

#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game: u32,
    pub seed: u64,
    pub agents: [&'static str; PLAYERS],
    pub round_scores: [[i32; ROUNDS as usize]; PLAYERS],
    pub final_scores: [i32; PLAYERS],
    pub winner: Option<PlayerIndex>,
    pub actions: u32,
    pub discards: u32,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine rejected action: {0}")]
    Engine(#[from] DomainError),
    #[error("agent {agent} in seat {seat} produced no move")]
    AgentStuck { seat: PlayerIndex, agent: &'static str },
    #[error("game exceeded {} actions", ACTION_CAP)]
    ActionCap,
}

pub struct Simulator {
    game: u32,
    seed: u64,
}

impl Simulator {
    pub fn new(game: u32, seed: u64) -> Self {
        Self { game, seed }
    }

    pub fn simulate_game(
        &self,
        agents: &mut [Box<dyn Agent>; PLAYERS],
    ) -> Result<GameResult, SimError> {
        let mut session = GameSession::with_seed(self.seed)?;
        let mut actions = 0;
        let mut discards = 0;

        while session.phase() == GamePhase::Draft {
            if actions >= ACTION_CAP {
                return Err(SimError::ActionCap);
            }
            actions += 1;

            let Some(seat) = session.to_act() else {
                break;
            };
            let agent = &mut agents[usize::from(seat)];
            let view = GameSnapshot::of(&session, Some(seat));

            let result = match view.pending.as_ref() {
                Some(pending) => {
                    let card_id = pending.card.id;
                    let choice = agent
                        .choose_placement(&view, pending.choice_kind)
                        .ok_or(SimError::AgentStuck { seat, agent: agent.name() })?;
                    session.resolve_choice(seat, card_id, choice)?
                }
                None => {
                    let card_id = agent
                        .choose_pick(&view)
                        .ok_or(SimError::AgentStuck { seat, agent: agent.name() })?;
                    session.pick(seat, card_id, None)?
                }
            };

            if matches!(result.outcome, PickOutcome::Discarded { .. }) {
                discards += 1;
            }
            debug!(game = self.game, seat, outcome = ?result.outcome, "Action applied");
        }

        let final_scores = session.total_scores();
        info!(
            game = self.game,
            seed = self.seed,
            ?final_scores,
            winner = ?session.winner(),
            actions,
            "Game finished"
        );

        Ok(GameResult {
            game: self.game,
            seed: self.seed,
            agents: [agents[0].name(), agents[1].name()],
            round_scores: *session.scores(),
            final_scores,
            winner: session.winner(),
            actions,
            discards,
        })
    }
}
