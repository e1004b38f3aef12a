//! Room configuration.

use std::time::Duration;

use cherrypick_protocol::GameMode;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BotPersona
// ---------------------------------------------------------------------------

/// Name and avatar of a bot seat injected when a 1v1 game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPersona {
    pub name: String,
    pub avatar: String,
}

impl BotPersona {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Tunables shared by every room on the server.
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Lives every player (and bot) starts with.
    pub starting_lives: u8,

    /// Seat limit for `1V1` rooms.
    pub one_v_one_capacity: usize,

    /// Seat limit for `MULTIPLAYER` rooms.
    pub multiplayer_capacity: usize,

    /// How long a round result stays on screen before the next round.
    pub reveal_delay: Duration,

    /// Length of generated room codes.
    pub code_length: usize,

    /// Collisions tolerated before code generation gives up.
    pub max_code_attempts: u32,

    /// Bots added to a `1V1` room on start, in seat order.
    pub bot_personas: Vec<BotPersona>,
}

impl RoomConfig {
    /// Characters room codes are drawn from. No `I`, `O`, `0` or `1`.
    pub const CODE_ALPHABET: &'static [u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    /// Seat limit for the given mode.
    pub fn capacity(&self, mode: GameMode) -> usize {
        match mode {
            GameMode::OneVOne => self.one_v_one_capacity,
            GameMode::Multiplayer => self.multiplayer_capacity,
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            starting_lives: 5,
            one_v_one_capacity: 2,
            multiplayer_capacity: 5,
            reveal_delay: Duration::from_secs(5),
            code_length: 6,
            max_code_attempts: 64,
            bot_personas: vec![
                BotPersona::new("Sour Grape", "grapes"),
                BotPersona::new("Coconut", "melon"),
            ],
        }
    }
}
