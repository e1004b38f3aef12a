//! Session orchestrator: the room lifecycle state machine.
//!
//! Every inbound action, disconnect and timer fire ends up here. Each
//! handler mutates the registry and returns [`Effects`]: messages to
//! deliver and timers to arm or cancel. Nothing in this module touches a
//! socket or a clock, which keeps the whole lifecycle testable with plain
//! function calls.
//!
//! ```text
//! LOBBY ──start_game──→ PLAYING ──last guess──→ REVEAL ──advance──→ PLAYING
//!                                                  │
//!                                                  └──advance, ≤1 alive──→ GAME_OVER
//! ```
//!
//! Invalid actions (wrong state, not host, out of lives, not seated) are
//! dropped without a reply. They come from stale buttons and racing
//! clicks, not from bugs worth reporting.

use std::time::Duration;

use cherrypick_protocol::{
    ClientMessage, GameMode, GameStatus, Guess, MAX_GUESS, Player, PlayerId, Recipient, RoomId,
    ServerMessage,
};

use crate::resolver::resolve;
use crate::{BotPolicy, RandomBotPolicy, RoomRegistry};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A timer the caller should arm or cancel on the orchestrator's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerRequest {
    /// Call [`SessionOrchestrator::advance`] with `room_id` and `round`
    /// after `delay`.
    Arm {
        room_id: RoomId,
        round: u32,
        delay: Duration,
    },
    /// The room is gone; drop whatever is pending for it.
    Cancel { room_id: RoomId },
}

/// Output of one orchestrator call, in the order it was produced.
#[derive(Debug, Default)]
pub struct Effects {
    pub messages: Vec<(Recipient, ServerMessage)>,
    pub timers: Vec<TimerRequest>,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.timers.is_empty()
    }

    fn broadcast(&mut self, room_id: &RoomId, msg: ServerMessage) {
        self.messages.push((Recipient::Room(room_id.clone()), msg));
    }

    fn reply(&mut self, player: PlayerId, msg: ServerMessage) {
        self.messages.push((Recipient::Player(player), msg));
    }
}

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Drives rooms through their lifecycle.
///
/// Owns the [`RoomRegistry`] it is given and a [`BotPolicy`] for bot
/// seats. Must be driven from one task at a time; the reactor in the
/// server crate guarantees that.
pub struct SessionOrchestrator<B: BotPolicy = RandomBotPolicy> {
    registry: RoomRegistry,
    bots: B,
}

impl<B: BotPolicy> SessionOrchestrator<B> {
    pub fn new(registry: RoomRegistry, bots: B) -> Self {
        Self { registry, bots }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Routes a decoded client action to its handler.
    ///
    /// Heartbeats are answered by the connection layer and produce no
    /// effects here.
    pub fn handle(&mut self, player: PlayerId, msg: ClientMessage) -> Effects {
        match msg {
            ClientMessage::CreateRoom { name, avatar, mode } => {
                self.create_room(player, &name, &avatar, mode)
            }
            ClientMessage::JoinRoom {
                room_id,
                name,
                avatar,
            } => self.join_room(player, &RoomId::new(room_id), &name, &avatar),
            ClientMessage::JoinQueue { name, avatar } => self.join_queue(player, &name, &avatar),
            ClientMessage::LeaveQueue => self.leave_queue(player),
            ClientMessage::StartGame => self.start_game(player),
            ClientMessage::SubmitGuess { number } => self.submit_guess(player, number),
            ClientMessage::Heartbeat { .. } => Effects::default(),
        }
    }

    /// Opens a lobby. Failures go back to the caller only.
    pub fn create_room(
        &mut self,
        player: PlayerId,
        name: &str,
        avatar: &str,
        mode: GameMode,
    ) -> Effects {
        let mut effects = Effects::default();
        match self.registry.create_room(player, name, avatar, mode) {
            Ok(room) => {
                effects.broadcast(&room.id, ServerMessage::RoomUpdate { room: room.clone() });
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "create_room refused");
                effects.reply(player, ServerMessage::Error { message: e.to_string() });
            }
        }
        effects
    }

    /// Seats the caller in a lobby. Failures go back to the caller only.
    pub fn join_room(
        &mut self,
        player: PlayerId,
        room_id: &RoomId,
        name: &str,
        avatar: &str,
    ) -> Effects {
        let mut effects = Effects::default();
        match self.registry.join_room(player, room_id, name, avatar) {
            Ok(room) => {
                effects.broadcast(&room.id, ServerMessage::RoomUpdate { room: room.clone() });
            }
            Err(e) => {
                tracing::debug!(%player, %room_id, error = %e, "join_room refused");
                effects.reply(player, ServerMessage::Error { message: e.to_string() });
            }
        }
        effects
    }

    /// Queues the caller for a 1v1. A completed pair gets the new room's
    /// snapshot; a waiting ticket gets its queue position.
    pub fn join_queue(&mut self, player: PlayerId, name: &str, avatar: &str) -> Effects {
        let mut effects = Effects::default();
        let already_waiting = self.registry.queue_position(player).is_some();

        if let Some(room) = self.registry.enqueue(player, name, avatar) {
            effects.broadcast(&room.id, ServerMessage::RoomUpdate { room: room.clone() });
        } else if !already_waiting {
            if let Some(position) = self.registry.queue_position(player) {
                effects.reply(player, ServerMessage::Queued { position });
            }
        }
        effects
    }

    pub fn leave_queue(&mut self, player: PlayerId) -> Effects {
        if self.registry.dequeue(player) {
            tracing::debug!(%player, "ticket withdrawn");
        }
        Effects::default()
    }

    /// Host only, lobby only. Replaces any bots left from a double click,
    /// seats fresh bots for 1v1, and starts round one.
    pub fn start_game(&mut self, player: PlayerId) -> Effects {
        let Some(room_id) = self.registry.room_of(player).cloned() else {
            return ignored(player, "start_game", "not seated");
        };
        match self.registry.get_room(&room_id) {
            Some(room) if room.host_id != player => {
                return ignored(player, "start_game", "not host");
            }
            Some(room) if room.status != GameStatus::Lobby => {
                return ignored(player, "start_game", "not in lobby");
            }
            Some(_) => {}
            None => return ignored(player, "start_game", "room gone"),
        }

        let lives = self.registry.config().starting_lives;
        let personas = self.registry.config().bot_personas.clone();
        let mode = self.registry.get_room(&room_id).map(|r| r.mode);
        let bots: Vec<Player> = if mode == Some(GameMode::OneVOne) {
            personas
                .into_iter()
                .map(|persona| {
                    let id = self.registry.allocate_bot_id();
                    Player::bot(id, persona.name, persona.avatar, lives)
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut effects = Effects::default();
        let Some(room) = self.registry.get_room_mut(&room_id) else {
            return effects;
        };
        room.players.retain(|p| !p.is_bot);
        room.players.extend(bots);
        for p in &mut room.players {
            p.current_guess = None;
        }
        room.last_result = None;
        debug_assert!(room.status.can_transition_to(GameStatus::Playing));
        room.status = GameStatus::Playing;
        room.round_number = 1;

        tracing::info!(
            %room_id,
            mode = %room.mode,
            players = room.players.len(),
            "game started"
        );
        effects.broadcast(&room_id, ServerMessage::RoomUpdate { room: room.clone() });
        effects.broadcast(&room_id, ServerMessage::GameStarted { room: room.clone() });
        effects
    }

    /// Records a guess. The last outstanding guess resolves the round.
    pub fn submit_guess(&mut self, player: PlayerId, number: i64) -> Effects {
        let Some(room_id) = self.registry.room_of(player).cloned() else {
            return ignored(player, "submit_guess", "not seated");
        };
        let Ok(guess) = Guess::try_from(number) else {
            return ignored(player, "submit_guess", "out of range");
        };
        if guess > MAX_GUESS {
            return ignored(player, "submit_guess", "out of range");
        }
        let Some(room) = self.registry.get_room_mut(&room_id) else {
            return ignored(player, "submit_guess", "room gone");
        };
        if room.status != GameStatus::Playing {
            return ignored(player, "submit_guess", "not playing");
        }
        match room.player_mut(player) {
            Some(seat) if seat.is_eligible() => seat.current_guess = Some(guess),
            Some(_) => return ignored(player, "submit_guess", "out of lives"),
            None => return ignored(player, "submit_guess", "not a member"),
        }

        let mut effects = Effects::default();
        if room.all_eligible_submitted() {
            self.resolve_round(&room_id, &mut effects);
        } else {
            tracing::debug!(%room_id, %player, "player locked in");
            effects.broadcast(&room_id, ServerMessage::PlayerLocked { player_id: player });
        }
        effects
    }

    /// Timer re-entry after a reveal. Stale fires (room gone, different
    /// round, not in reveal) are discarded.
    pub fn advance(&mut self, room_id: &RoomId, round: u32) -> Effects {
        let mut effects = Effects::default();
        let Some(room) = self.registry.get_room_mut(room_id) else {
            tracing::debug!(%room_id, "advance for a destroyed room discarded");
            return effects;
        };
        if room.status != GameStatus::Reveal || room.round_number != round {
            tracing::debug!(
                %room_id,
                round,
                current = room.round_number,
                status = %room.status,
                "stale advance discarded"
            );
            return effects;
        }

        let survivors: Vec<Player> = room.survivors().cloned().collect();
        if survivors.len() <= 1 {
            debug_assert!(room.status.can_transition_to(GameStatus::GameOver));
            room.status = GameStatus::GameOver;
            let winner = survivors.into_iter().next();
            tracing::info!(
                %room_id,
                rounds = room.round_number,
                winner = ?winner.as_ref().map(|p| p.id),
                "game over"
            );
            effects.broadcast(
                room_id,
                ServerMessage::GameOver {
                    winner,
                    room: room.clone(),
                },
            );
            effects.broadcast(room_id, ServerMessage::RoomUpdate { room: room.clone() });
            return effects;
        }

        for p in &mut room.players {
            p.current_guess = None;
        }
        room.last_result = None;
        room.round_number += 1;
        debug_assert!(room.status.can_transition_to(GameStatus::Playing));
        room.status = GameStatus::Playing;
        tracing::debug!(%room_id, round = room.round_number, "new round");
        effects.broadcast(room_id, ServerMessage::NewRound { room: room.clone() });
        effects.broadcast(room_id, ServerMessage::RoomUpdate { room: room.clone() });

        // Only bots left alive: nobody will submit, so play the round out.
        if room.all_eligible_submitted() {
            self.resolve_round(room_id, &mut effects);
        }
        effects
    }

    /// Connection closed: drop the seat (and ticket), migrate host, and
    /// tell whoever is left.
    pub fn disconnect(&mut self, player: PlayerId) -> Effects {
        let mut effects = Effects::default();
        let Some(departure) = self.registry.remove_player(player) else {
            return effects;
        };
        let room_id = departure.room_id.clone();

        if departure.room_destroyed() {
            effects.timers.push(TimerRequest::Cancel { room_id });
            return effects;
        }

        effects.broadcast(
            &room_id,
            ServerMessage::PlayerLeft {
                players: departure.remaining_players,
            },
        );
        let Some(room) = self.registry.get_room(&room_id) else {
            return effects;
        };
        effects.broadcast(&room_id, ServerMessage::RoomUpdate { room: room.clone() });

        // The leaver may have been the only one the round was waiting on.
        if room.status == GameStatus::Playing && room.all_eligible_submitted() {
            self.resolve_round(&room_id, &mut effects);
        }
        effects
    }

    /// PLAYING → REVEAL: collect guesses, resolve, broadcast, arm the
    /// reveal timer.
    fn resolve_round(&mut self, room_id: &RoomId, effects: &mut Effects) {
        let delay = self.registry.config().reveal_delay;
        let Some(room) = self.registry.get_room_mut(room_id) else {
            return;
        };

        let humans: Vec<(PlayerId, Guess)> = room
            .eligible_humans()
            .filter_map(|p| p.current_guess.map(|g| (p.id, g)))
            .collect();
        let bots = self.bots.generate_guesses(room);

        let result = resolve(room, &humans, &bots);
        room.last_result = Some(result.clone());
        debug_assert!(room.status.can_transition_to(GameStatus::Reveal));
        room.status = GameStatus::Reveal;

        tracing::info!(
            %room_id,
            round = room.round_number,
            target = result.target_number,
            rotten_zero = result.is_rotten_zero,
            winner = ?result.winner_id,
            "round resolved"
        );

        effects.broadcast(
            room_id,
            ServerMessage::RoundResult {
                room: room.clone(),
                result,
            },
        );
        effects.timers.push(TimerRequest::Arm {
            room_id: room_id.clone(),
            round: room.round_number,
            delay,
        });
    }
}

fn ignored(player: PlayerId, action: &str, reason: &str) -> Effects {
    tracing::debug!(%player, action, reason, "action ignored");
    Effects::default()
}
