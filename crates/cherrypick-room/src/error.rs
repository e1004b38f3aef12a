//! Error types for the room layer.
//!
//! Display strings double as the message shown to the player, so keep
//! them short and free of internal ids.

use cherrypick_protocol::{PlayerId, RoomId};

/// Why a create or join request was refused.
///
/// Invalid in-game actions (wrong state, not host, out of lives) are not
/// errors: the orchestrator drops them silently.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoomError {
    /// No room has this code.
    #[error("Room not found")]
    RoomNotFound(RoomId),

    /// The room has left the lobby.
    #[error("Game in progress")]
    GameInProgress(RoomId),

    /// Every seat is taken.
    #[error("Room full")]
    RoomFull(RoomId),

    /// The connection already has a seat somewhere.
    #[error("Already in a room")]
    AlreadyInRoom(PlayerId, RoomId),

    /// Every attempt at a fresh code collided with a live room.
    #[error("No room codes available, try again")]
    CodeSpaceExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let id = RoomId::new("ABCDEF");
        assert_eq!(RoomError::RoomNotFound(id.clone()).to_string(), "Room not found");
        assert_eq!(RoomError::GameInProgress(id.clone()).to_string(), "Game in progress");
        assert_eq!(RoomError::RoomFull(id).to_string(), "Room full");
    }
}
