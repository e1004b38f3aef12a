//! Client actions, server events and the envelope that carries them.
//!
//! Clients send a [`ClientMessage`] tagged by `"action"`; the server
//! answers with [`ServerMessage`]s tagged by `"event"`. Both travel inside
//! an [`Envelope`].

use serde::{Deserialize, Serialize};

use crate::types::{GameMode, Player, PlayerId, Room, RoomId, RoundResult};

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who a server message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Every human connection seated in the room at delivery time.
    Room(RoomId),
    /// A single connection.
    Player(PlayerId),
}

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// Everything a client can ask the server to do.
///
/// ```json
/// { "action": "join_room", "roomId": "K7QX2M", "name": "Ana", "avatar": "cherry" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new lobby with the caller as host.
    CreateRoom {
        name: String,
        avatar: String,
        mode: GameMode,
    },

    /// Take a seat in an existing lobby.
    JoinRoom {
        room_id: String,
        name: String,
        avatar: String,
    },

    /// Wait for a 1v1 opponent.
    JoinQueue { name: String, avatar: String },

    /// Stop waiting for an opponent.
    LeaveQueue,

    /// Host only: leave the lobby and start round one.
    StartGame,

    /// Lock in a number for the current round. Kept wide so out-of-range
    /// values reach validation instead of failing to decode.
    SubmitGuess { number: i64 },

    /// Keep-alive. Echoed back with the server clock.
    Heartbeat { client_time: u64 },
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// Everything the server can tell a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// First message on every connection: the caller's own id.
    Welcome { player_id: PlayerId },

    /// Full room snapshot, sent on every state change.
    RoomUpdate { room: Room },

    /// The host started the game.
    GameStarted { room: Room },

    /// A player submitted. Carries no value so guesses don't leak.
    PlayerLocked { player_id: PlayerId },

    /// The round resolved; the room is now in reveal.
    RoundResult { room: Room, result: RoundResult },

    /// Reveal is over and a fresh round is collecting guesses.
    NewRound { room: Room },

    /// At most one player survived.
    GameOver { winner: Option<Player>, room: Room },

    /// Someone disconnected; the remaining seats.
    PlayerLeft { players: Vec<Player> },

    /// The caller's matchmaking ticket is waiting at `position` (1-based).
    Queued { position: usize },

    /// Reply to [`ClientMessage::Heartbeat`].
    HeartbeatAck { client_time: u64, server_time: u64 },

    /// A create/join request failed. Only ever sent to the requester.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wire wrapper around every message.
///
/// `seq` is a per-sender counter; `timestamp` is milliseconds since the
/// sender's connection started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub seq: u64,
    pub timestamp: u64,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(seq: u64, timestamp: u64, payload: T) -> Self {
        Self {
            seq,
            timestamp,
            payload,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
