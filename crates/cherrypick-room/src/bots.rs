//! Guess generation for bot seats.
//!
//! Bots exist to keep a 1v1 table lively, not to play well. The
//! [`BotPolicy`] trait is the seam: the orchestrator only ever asks a
//! policy for this round's numbers, so a smarter policy can be dropped in
//! without touching resolution or the room lifecycle.

use cherrypick_protocol::{Guess, MAX_GUESS, PlayerId, Room};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces this round's guesses for the bots in a room.
pub trait BotPolicy: Send + 'static {
    /// One entry per living bot, in seat order. Humans and dead bots must
    /// not appear.
    fn generate_guesses(&mut self, room: &Room) -> Vec<(PlayerId, Guess)>;
}

/// Upper bound of the cautious persona's range.
const CAUTIOUS_MAX: Guess = 20;

/// Coin-flip between two personas, fresh every round:
///
/// - cautious: uniform in `0..=20`
/// - wildcard: uniform in `0..=100`
///
/// No memory of earlier rounds.
pub struct RandomBotPolicy<R = StdRng> {
    rng: R,
}

impl RandomBotPolicy<StdRng> {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic policy for tests and replays of a single process.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomBotPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomBotPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn draw(&mut self) -> Guess {
        if self.rng.random_bool(0.5) {
            self.rng.random_range(0..=CAUTIOUS_MAX)
        } else {
            self.rng.random_range(0..=MAX_GUESS)
        }
    }
}

impl<R: Rng + Send + 'static> BotPolicy for RandomBotPolicy<R> {
    fn generate_guesses(&mut self, room: &Room) -> Vec<(PlayerId, Guess)> {
        let bots: Vec<PlayerId> = room
            .players
            .iter()
            .filter(|p| p.is_bot && p.is_alive())
            .map(|p| p.id)
            .collect();

        bots.into_iter().map(|id| (id, self.draw())).collect()
    }
}
