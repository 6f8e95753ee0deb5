//! Room registry: seats, per-room serialisation and fan-out.
//!
//! Each room sits behind its own `parking_lot::Mutex`, so actions on one
//! game are applied one at a time while different games proceed in
//! parallel. The outer `DashMap` is only touched to find, create or drop a
//! room, never while a room lock is held.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vetrolisci::domain::seed_derivation::{derive_session_seed, session_rng};
use vetrolisci::domain::{GameSnapshot, PlayerIndex, PLAYERS};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::games::{ActiveGame, GameKind, PlayerAction};
use crate::ws::protocol::ServerMsg;

/// Outbound message for one websocket session.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Deliver(pub ServerMsg);

struct Seat {
    conn_id: Uuid,
    recipient: Recipient<Deliver>,
}

struct Room {
    game_id: i64,
    kind: GameKind,
    seats: [Option<Seat>; PLAYERS],
    game: Option<ActiveGame>,
    /// Set once the room has been dropped from the registry.
    closed: bool,
}

impl Room {
    fn new(game_id: i64, kind: GameKind) -> Self {
        Self {
            game_id,
            kind,
            seats: Default::default(),
            game: None,
            closed: false,
        }
    }

    fn seat_of(&self, conn_id: Uuid) -> Option<PlayerIndex> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.conn_id == conn_id))
            .map(|i| i as PlayerIndex)
    }

    fn free_seat(&self) -> Option<PlayerIndex> {
        self.seats
            .iter()
            .position(Option::is_none)
            .map(|i| i as PlayerIndex)
    }

    fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    fn is_empty(&self) -> bool {
        self.seats.iter().all(Option::is_none)
    }

    fn send_to(&self, seat: PlayerIndex, msg: ServerMsg) {
        if let Some(s) = &self.seats[usize::from(seat)] {
            s.recipient.do_send(Deliver(msg));
        }
    }

    fn broadcast(&self, msg: &ServerMsg) {
        for s in self.seats.iter().flatten() {
            s.recipient.do_send(Deliver(msg.clone()));
        }
    }

    /// Per-seat snapshot, so each player sees their own pick eligibility.
    fn broadcast_state(&self) {
        let Some(game) = &self.game else {
            return;
        };
        for seat in 0..PLAYERS as PlayerIndex {
            self.send_to(
                seat,
                ServerMsg::GameState {
                    game_id: self.game_id,
                    game: game.snapshot(Some(seat)),
                },
            );
        }
    }
}

pub struct RoomHub {
    rooms: DashMap<i64, Arc<Mutex<Room>>>,
    base_seed: Option<u64>,
}

impl RoomHub {
    pub fn new(base_seed: Option<u64>) -> Self {
        Self {
            rooms: DashMap::new(),
            base_seed,
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn rng_for(&self, game_id: i64) -> ChaCha8Rng {
        match self.base_seed {
            Some(base) => session_rng(derive_session_seed(base, game_id)),
            None => ChaCha8Rng::from_os_rng(),
        }
    }

    fn room(&self, game_id: i64) -> Result<Arc<Mutex<Room>>, AppError> {
        self.rooms
            .get(&game_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::GameNotFound, format!("Game {game_id} not found"))
            })
    }

    /// Seat `conn_id` in `game_id`, creating the room on first join. The game
    /// starts once both seats are taken. Joining twice returns the same seat.
    pub fn join(
        &self,
        game_id: i64,
        conn_id: Uuid,
        recipient: Recipient<Deliver>,
    ) -> Result<(PlayerIndex, GameKind), AppError> {
        let room = self
            .rooms
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(Room::new(game_id, GameKind::default()))))
            .value()
            .clone();
        let mut room = room.lock();

        if room.closed {
            return Err(AppError::conflict(
                ErrorCode::PhaseMismatch,
                format!("Game {game_id} has ended"),
            ));
        }
        if let Some(seat) = room.seat_of(conn_id) {
            return Ok((seat, room.kind));
        }
        let seat = room.free_seat().ok_or_else(|| {
            AppError::conflict(
                ErrorCode::RoomFull,
                format!("Game {game_id} already has two players"),
            )
        })?;
        room.seats[usize::from(seat)] = Some(Seat { conn_id, recipient });
        info!(game_id, seat, conn_id = %conn_id, "Player seated");

        if room.game.is_none() && room.is_full() {
            let game = ActiveGame::start(room.kind, self.rng_for(game_id))?;
            room.game = Some(game);
            info!(game_id, kind = room.kind.as_str(), "Game started");
            room.broadcast_state();
        }
        Ok((seat, room.kind))
    }

    /// Apply a seated player's action and fan out the results.
    ///
    /// The actor gets the `outcome`; both seats get every event and a fresh
    /// `game_state`. Rejected actions change nothing and reach only the caller
    /// as the returned error.
    pub fn act(&self, game_id: i64, conn_id: Uuid, action: PlayerAction) -> Result<(), AppError> {
        let room = self.room(game_id)?;
        let mut room = room.lock();

        let seat = room.seat_of(conn_id).ok_or_else(|| {
            AppError::bad_request(ErrorCode::NotSeated, "Join the game before acting")
        })?;
        let game = room.game.as_mut().ok_or_else(|| {
            AppError::conflict(ErrorCode::GameNotStarted, "Waiting for a second player")
        })?;
        let result = game.apply(seat, action)?;
        debug!(game_id, seat, ?action, events = result.events.len(), "Action applied");

        room.send_to(
            seat,
            ServerMsg::Outcome {
                game_id,
                seat,
                result: result.outcome,
            },
        );
        for event in result.events {
            room.broadcast(&ServerMsg::from_event(game_id, event));
        }
        room.broadcast_state();
        Ok(())
    }

    /// Drop `conn_id` from its seat. Leaving a game in progress abandons it,
    /// tells the opponent and removes the room.
    pub fn leave(&self, game_id: i64, conn_id: Uuid) {
        let Ok(room_arc) = self.room(game_id) else {
            return;
        };
        let mut room = room_arc.lock();
        let Some(seat) = room.seat_of(conn_id) else {
            return;
        };
        room.seats[usize::from(seat)] = None;

        let in_progress = room.game.as_ref().is_some_and(|g| !g.is_over());
        if in_progress {
            if let Some(game) = room.game.as_mut() {
                game.abandon();
            }
            warn!(game_id, seat, "Player left mid-game, game abandoned");
            room.broadcast(&ServerMsg::OpponentLeft { game_id, seat });
        } else {
            debug!(game_id, seat, "Player left");
        }

        if in_progress || room.is_empty() {
            room.closed = true;
            drop(room);
            self.rooms
                .remove_if(&game_id, |_, r| Arc::ptr_eq(r, &room_arc));
            info!(game_id, "Room closed");
        }
    }

    /// Public view of a started game.
    pub fn snapshot(&self, game_id: i64) -> Result<GameSnapshot, AppError> {
        let room = self.room(game_id)?;
        let room = room.lock();
        room.game
            .as_ref()
            .map(|g| g.snapshot(None))
            .ok_or_else(|| {
                AppError::conflict(ErrorCode::GameNotStarted, "Waiting for a second player")
            })
    }
}
