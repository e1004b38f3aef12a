//! Transport layer for Cherry Pick.
//!
//! Provides the [`Transport`] and [`Connection`] traits the server is
//! written against, plus a WebSocket implementation. Payloads are opaque
//! bytes here; framing into JSON happens in the protocol crate.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport, WebSocketUpgrade};

use std::fmt;
use std::net::SocketAddr;

/// Opaque identifier for a connection. Unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    type Incoming: Incoming;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Waits for the next peer. Must not wait on the peer itself; any
    /// handshake belongs in [`Incoming::upgrade`].
    async fn accept(&mut self) -> Result<Self::Incoming, Self::Error>;

    /// The address the transport is listening on.
    fn local_addr(&self) -> Result<SocketAddr, Self::Error>;
}

/// An accepted peer that has not finished its handshake yet.
///
/// Upgrading is meant to run on the connection's own task, off the
/// accept loop.
pub trait Incoming: Send + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Completes the handshake.
    async fn upgrade(self) -> Result<Self::Connection, Self::Error>;

    fn peer_addr(&self) -> SocketAddr;
}

/// A single bidirectional connection.
///
/// `send` and `recv` may run concurrently from different tasks: a reader
/// parked in `recv` must never hold up outbound traffic.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one message to the remote peer.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next message from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;

    fn peer_addr(&self) -> SocketAddr;
}
