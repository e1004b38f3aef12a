//! Room registry: owns every room, tracks which connection sits where.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use cherrypick_protocol::{GameMode, GameStatus, Player, PlayerId, Room, RoomId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matchmaking::{MatchmakingQueue, Ticket};
use crate::{RoomConfig, RoomError};

/// Bot ids start here, far above anything the connection counter reaches
/// and still exact as a JavaScript number.
const FIRST_BOT_ID: u64 = 1 << 48;

/// What [`RoomRegistry::remove_player`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub room_id: RoomId,
    /// Seats left after the removal. Empty when the room was destroyed.
    pub remaining_players: Vec<Player>,
    /// Set when the leaver was host and someone else took over.
    pub new_host: Option<PlayerId>,
}

impl Departure {
    pub fn room_destroyed(&self) -> bool {
        self.remaining_players.is_empty()
    }
}

/// The authoritative store of rooms and seats.
///
/// Not thread-safe on its own: exactly one owner (the orchestrator, driven
/// by a single reactor task) mutates it.
pub struct RoomRegistry {
    /// Live rooms by code.
    rooms: HashMap<RoomId, Room>,

    /// Connection → room. A connection holds at most one seat.
    player_rooms: HashMap<PlayerId, RoomId>,

    queue: MatchmakingQueue,
    config: RoomConfig,
    rng: StdRng,
    next_bot_id: u64,
}

impl RoomRegistry {
    /// Creates an empty registry seeded from the operating system.
    pub fn new(config: RoomConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an empty registry whose room codes are reproducible.
    pub fn with_seed(config: RoomConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RoomConfig, rng: StdRng) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            queue: MatchmakingQueue::new(),
            config,
            rng,
            next_bot_id: FIRST_BOT_ID,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------

    /// Opens a lobby with `owner` as its only seat and host.
    ///
    /// A queued owner loses their ticket.
    ///
    /// # Errors
    /// - [`RoomError::AlreadyInRoom`] if `owner` is seated somewhere.
    /// - [`RoomError::CodeSpaceExhausted`] if no free code was found.
    pub fn create_room(
        &mut self,
        owner: PlayerId,
        name: &str,
        avatar: &str,
        mode: GameMode,
    ) -> Result<&Room, RoomError> {
        if let Some(current) = self.player_rooms.get(&owner) {
            return Err(RoomError::AlreadyInRoom(owner, current.clone()));
        }
        let room_id = self.generate_code()?;
        self.queue.remove(owner);

        let mut host = Player::human(owner, name, avatar, self.config.starting_lives);
        host.is_host = true;
        host.is_ready = true;

        Ok(self.insert_room(room_id, mode, vec![host]))
    }

    /// Seats `player` in an existing lobby.
    ///
    /// A failed join leaves the room untouched.
    ///
    /// # Errors
    /// [`RoomError::RoomNotFound`], [`RoomError::GameInProgress`],
    /// [`RoomError::RoomFull`], or [`RoomError::AlreadyInRoom`].
    pub fn join_room(
        &mut self,
        player: PlayerId,
        room_id: &RoomId,
        name: &str,
        avatar: &str,
    ) -> Result<&Room, RoomError> {
        if let Some(current) = self.player_rooms.get(&player) {
            return Err(RoomError::AlreadyInRoom(player, current.clone()));
        }

        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))?;
        if !room.status.is_joinable() {
            return Err(RoomError::GameInProgress(room_id.clone()));
        }
        if room.players.len() >= self.config.capacity(room.mode) {
            return Err(RoomError::RoomFull(room_id.clone()));
        }

        room.players.push(Player::human(
            player,
            name,
            avatar,
            self.config.starting_lives,
        ));
        self.player_rooms.insert(player, room_id.clone());
        self.queue.remove(player);

        tracing::info!(
            %room_id,
            %player,
            players = room.players.len(),
            "player joined"
        );
        Ok(room)
    }

    pub fn get_room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_room_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// The room code a connection is seated in.
    pub fn room_of(&self, player: PlayerId) -> Option<&RoomId> {
        self.player_rooms.get(&player)
    }

    pub fn get_room_by_connection(&self, player: PlayerId) -> Option<&Room> {
        self.room_of(player).and_then(|id| self.rooms.get(id))
    }

    /// Human seats of a room, i.e. the connections a broadcast reaches.
    pub fn members(&self, room_id: &RoomId) -> Vec<PlayerId> {
        self.rooms
            .get(room_id)
            .map(|room| room.humans().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    /// Removes a connection from its room and from the queue.
    ///
    /// When no human is left the room is destroyed, bots and all. When the
    /// host leaves, the earliest remaining human becomes host.
    ///
    /// Returns `None` if the connection had no seat.
    pub fn remove_player(&mut self, player: PlayerId) -> Option<Departure> {
        self.queue.remove(player);

        let room_id = self.player_rooms.remove(&player)?;
        let Some(room) = self.rooms.get_mut(&room_id) else {
            tracing::warn!(%room_id, %player, "seat pointed at a missing room");
            return None;
        };

        room.players.retain(|p| p.id != player);
        tracing::info!(
            %room_id,
            %player,
            players = room.players.len(),
            "player left"
        );

        if room.human_count() == 0 {
            self.rooms.remove(&room_id);
            self.player_rooms.retain(|_, rid| *rid != room_id);
            tracing::info!(%room_id, "room destroyed");
            return Some(Departure {
                room_id,
                remaining_players: Vec::new(),
                new_host: None,
            });
        }

        let mut new_host = None;
        if room.host_id == player {
            if let Some(next) = room.players.iter_mut().find(|p| !p.is_bot) {
                next.is_host = true;
                room.host_id = next.id;
                new_host = Some(next.id);
                tracing::info!(%room_id, host = %next.id, "host migrated");
            }
        }

        Some(Departure {
            room_id,
            remaining_players: room.players.clone(),
            new_host,
        })
    }

    /// Hands out an id for a new bot seat.
    pub fn allocate_bot_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next_bot_id);
        self.next_bot_id += 1;
        id
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // -----------------------------------------------------------------
    // Matchmaking
    // -----------------------------------------------------------------

    /// Queues a solo player for a 1v1.
    ///
    /// Ignored if the connection is already seated or queued. As soon as
    /// two tickets wait, the two oldest become a new `1V1` lobby with the
    /// first as host, and that room is returned.
    pub fn enqueue(&mut self, player: PlayerId, name: &str, avatar: &str) -> Option<&Room> {
        if self.player_rooms.contains_key(&player) || self.queue.contains(player) {
            tracing::debug!(%player, "duplicate matchmaking request ignored");
            return None;
        }
        self.queue.push(Ticket {
            player_id: player,
            name: name.to_string(),
            avatar: avatar.to_string(),
        });
        tracing::debug!(%player, waiting = self.queue.len(), "ticket queued");

        if self.queue.len() < 2 {
            return None;
        }
        let room_id = match self.generate_code() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "could not open a room for a matched pair");
                return None;
            }
        };
        let (first, second) = self.queue.pop_pair()?;

        let lives = self.config.starting_lives;
        let mut host = Player::human(first.player_id, first.name, first.avatar, lives);
        host.is_host = true;
        host.is_ready = true;
        let mut challenger = Player::human(second.player_id, second.name, second.avatar, lives);
        challenger.is_ready = true;

        tracing::info!(
            %room_id,
            host = %host.id,
            challenger = %challenger.id,
            "matchmaking paired two players"
        );
        Some(self.insert_room(room_id, GameMode::OneVOne, vec![host, challenger]))
    }

    /// Withdraws a waiting ticket. No-op if there is none.
    pub fn dequeue(&mut self, player: PlayerId) -> bool {
        self.queue.remove(player)
    }

    pub fn queue_position(&self, player: PlayerId) -> Option<usize> {
        self.queue.position(player)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// `players[0]` becomes host.
    fn insert_room(&mut self, room_id: RoomId, mode: GameMode, players: Vec<Player>) -> &Room {
        for p in &players {
            self.player_rooms.insert(p.id, room_id.clone());
        }
        let room = Room {
            id: room_id.clone(),
            host_id: players[0].id,
            players,
            status: GameStatus::Lobby,
            mode,
            round_number: 0,
            last_result: None,
            created_at: now_millis(),
        };
        tracing::info!(%room_id, %mode, "room created");
        self.rooms.entry(room_id).or_insert(room)
    }

    /// Draws codes until one is free, up to `max_code_attempts`.
    fn generate_code(&mut self) -> Result<RoomId, RoomError> {
        let alphabet = RoomConfig::CODE_ALPHABET;
        for _ in 0..self.config.max_code_attempts {
            let code: String = (0..self.config.code_length)
                .map(|_| alphabet[self.rng.random_range(0..alphabet.len())] as char)
                .collect();
            let room_id = RoomId::new(code);
            if !self.rooms.contains_key(&room_id) {
                return Ok(room_id);
            }
        }
        tracing::warn!(
            attempts = self.config.max_code_attempts,
            rooms = self.rooms.len(),
            "room code space exhausted"
        );
        Err(RoomError::CodeSpaceExhausted)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
