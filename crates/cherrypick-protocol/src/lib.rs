//! Wire protocol and data model for the Cherry Pick server.
//!
//! - **Model** ([`Room`], [`Player`], [`RoundResult`], ids) — the state
//!   the server owns and broadcasts as snapshots.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`Envelope`]) —
//!   what crosses the connection.
//! - **Codec** ([`Codec`], [`JsonCodec`]) — how envelopes become bytes.
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope) → Room layer (actions/effects)
//! ```

mod codec;
mod error;
mod message;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use message::{ClientMessage, Envelope, Recipient, ServerMessage};
pub use types::{
    GameMode, GameStatus, Guess, GuessSheet, MAX_GUESS, Player, PlayerId, Room, RoomId,
    RoundResult,
};
