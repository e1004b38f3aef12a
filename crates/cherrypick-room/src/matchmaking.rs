//! FIFO wait-list for 1v1 matchmaking.
//!
//! The queue only stages tickets. Turning a pair of tickets into a room is
//! the registry's job ([`RoomRegistry::enqueue`](crate::RoomRegistry::enqueue)),
//! since only the registry may create rooms.

use std::collections::VecDeque;

use cherrypick_protocol::PlayerId;

/// A solo player waiting for an opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub player_id: PlayerId,
    pub name: String,
    pub avatar: String,
}

/// Strict first-in, first-out. No rating, no preferences.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    tickets: VecDeque<Ticket>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.tickets.iter().any(|t| t.player_id == player_id)
    }

    /// Appends a ticket. Returns `false` (and changes nothing) if the
    /// player already holds one.
    pub fn push(&mut self, ticket: Ticket) -> bool {
        if self.contains(ticket.player_id) {
            return false;
        }
        self.tickets.push_back(ticket);
        true
    }

    /// Drops a player's ticket. Returns whether one was waiting.
    pub fn remove(&mut self, player_id: PlayerId) -> bool {
        let before = self.tickets.len();
        self.tickets.retain(|t| t.player_id != player_id);
        self.tickets.len() != before
    }

    /// Takes the two oldest tickets, if two are waiting.
    pub fn pop_pair(&mut self) -> Option<(Ticket, Ticket)> {
        if self.tickets.len() < 2 {
            return None;
        }
        let first = self.tickets.pop_front()?;
        let second = self.tickets.pop_front()?;
        Some((first, second))
    }

    /// 1-based position of a waiting player.
    pub fn position(&self, player_id: PlayerId) -> Option<usize> {
        self.tickets
            .iter()
            .position(|t| t.player_id == player_id)
            .map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
