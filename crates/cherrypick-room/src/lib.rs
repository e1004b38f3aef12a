//! Rooms, matchmaking and the round lifecycle for Cherry Pick.
//!
//! Everything here is synchronous and single-owner. The server crate runs
//! one reactor task that owns a [`SessionOrchestrator`] and feeds it
//! client actions, disconnects and timer fires, one at a time.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: rooms by code, seats by connection, the 1v1 queue
//! - [`SessionOrchestrator`]: the LOBBY → PLAYING → REVEAL → GAME_OVER machine
//! - [`resolve`]: scores one round
//! - [`BotPolicy`]: where bot numbers come from
//! - [`RoomConfig`]: lives, capacities, reveal delay, bot personas

mod bots;
mod config;
mod error;
mod matchmaking;
mod orchestrator;
mod registry;
mod resolver;

pub use bots::{BotPolicy, RandomBotPolicy};
pub use config::{BotPersona, RoomConfig};
pub use error::RoomError;
pub use matchmaking::{MatchmakingQueue, Ticket};
pub use orchestrator::{Effects, SessionOrchestrator, TimerRequest};
pub use registry::{Departure, RoomRegistry};
pub use resolver::{ROTTEN_ZERO_TARGET, resolve};
