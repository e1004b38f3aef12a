//! The game's data model as it travels on the wire.
//!
//! These are the authoritative shapes the server owns and broadcasts:
//! [`Room`], [`Player`] and [`RoundResult`]. The room layer mutates them;
//! clients only ever see serialized snapshots.
//!
//! Field names are camelCase on the wire because the browser client
//! consumes them directly.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A submitted number. Valid guesses are `0..=MAX_GUESS`.
pub type Guess = u8;

/// Highest number a player may submit.
pub const MAX_GUESS: Guess = 100;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifies a player inside a room.
///
/// Human players reuse their connection id; bots are handed ids from a
/// range no connection will ever reach. Serializes as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The short public code of a room, e.g. `"K7QX2M"`.
///
/// Codes are always stored upper case so lookups typed by hand on a phone
/// keyboard still match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Wraps a code, normalizing it to upper case.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Status and mode
// ---------------------------------------------------------------------------

/// Lifecycle of a room.
///
/// ```text
/// Lobby → Playing → Reveal → Playing → ... → Reveal → GameOver
/// ```
///
/// A room never returns to `Lobby` once play has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Lobby,
    Playing,
    Reveal,
    GameOver,
}

impl GameStatus {
    /// Only lobbies accept new players.
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if moving from `self` to `target` is a legal step.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Lobby, Self::Playing)
                | (Self::Playing, Self::Reveal)
                | (Self::Reveal, Self::Playing)
                | (Self::Reveal, Self::GameOver)
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "LOBBY"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Reveal => write!(f, "REVEAL"),
            Self::GameOver => write!(f, "GAME_OVER"),
        }
    }
}

/// Room flavour. Fixes the seat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans (plus two bots once the game starts).
    #[serde(rename = "1V1")]
    OneVOne,
    /// Up to five humans, no bots.
    #[serde(rename = "MULTIPLAYER")]
    Multiplayer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneVOne => write!(f, "1V1"),
            Self::Multiplayer => write!(f, "MULTIPLAYER"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One seat in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque avatar reference. The server never interprets it.
    pub avatar: String,
    pub lives: u8,
    /// `None` until the player submits in the current round.
    pub current_guess: Option<Guess>,
    pub is_bot: bool,
    pub is_ready: bool,
    pub is_host: bool,
}

impl Player {
    /// A human player with a full set of lives.
    pub fn human(
        id: PlayerId,
        name: impl Into<String>,
        avatar: impl Into<String>,
        lives: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
            lives,
            current_guess: None,
            is_bot: false,
            is_ready: false,
            is_host: false,
        }
    }

    /// A bot seat. Bots are always ready and never host.
    pub fn bot(
        id: PlayerId,
        name: impl Into<String>,
        avatar: impl Into<String>,
        lives: u8,
    ) -> Self {
        Self {
            is_bot: true,
            is_ready: true,
            ..Self::human(id, name, avatar, lives)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// A living human: the players a round waits on.
    pub fn is_eligible(&self) -> bool {
        !self.is_bot && self.is_alive()
    }

    /// Takes one life, never going below zero.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Round result
// ---------------------------------------------------------------------------

/// Every submission of a round, in the order they were merged
/// (humans first, then bots).
///
/// Serialized as a JSON object `{ "<playerId>": guess }`. Insertion order
/// is kept because winner tie-breaks depend on it.
pub type GuessSheet = IndexMap<PlayerId, Guess>;

/// The outcome of one round. Produced once, never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub target_number: Guess,
    /// Mean of all submissions. Reported as 0 when the rotten-zero rule
    /// fired, since the mean played no part in the target.
    pub average: f64,
    /// `None` only when nobody submitted.
    pub winner_id: Option<PlayerId>,
    /// Every participant except the winner.
    pub eliminated_ids: Vec<PlayerId>,
    pub is_rotten_zero: bool,
    pub all_guesses: GuessSheet,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// One game session and its seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub host_id: PlayerId,
    /// Insertion order, which is also display order.
    pub players: Vec<Player>,
    pub status: GameStatus,
    pub mode: GameMode,
    pub round_number: u32,
    pub last_result: Option<RoundResult>,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl Room {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Human seats, bots excluded.
    pub fn humans(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_bot)
    }

    pub fn human_count(&self) -> usize {
        self.humans().count()
    }

    /// Living humans: the players a round waits on.
    pub fn eligible_humans(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_eligible())
    }

    /// `true` once every living human has a guess in. Vacuously `true`
    /// when no living human is left.
    pub fn all_eligible_submitted(&self) -> bool {
        self.eligible_humans().all(|p| p.current_guess.is_some())
    }

    /// Players with at least one life left, bots included.
    pub fn survivors(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }
}

// =========================================================================
// Tests
// =========================================================================
