//! # Cherry Pick
//!
//! Authoritative server for Cherry Pick, a party game where every player
//! guesses a number from 0 to 100 and the one closest to 0.8 × the mean
//! wins the round. Everyone else loses a life; a single zero forces the
//! target to 100.
//!
//! Connections speak JSON envelopes over WebSocket. All game state lives
//! in one reactor task, so rooms need no locks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cherrypick::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CherryPickError> {
//!     let server = CherryPickServer::builder().bind("127.0.0.1:3001").build().await?;
//!     server.run().await
//! }
//! ```

mod config;
mod error;
mod handler;
mod reactor;
mod server;

pub use config::ServerConfig;
pub use error::CherryPickError;
pub use server::{CherryPickServer, CherryPickServerBuilder};

pub mod prelude {
    pub use crate::{CherryPickError, CherryPickServer, CherryPickServerBuilder, ServerConfig};
    pub use cherrypick_protocol::{
        ClientMessage, Envelope, GameMode, GameStatus, Player, PlayerId, Room, RoomId,
        RoundResult, ServerMessage,
    };
    pub use cherrypick_room::{BotPersona, BotPolicy, RandomBotPolicy, RoomConfig, RoomError};
}
