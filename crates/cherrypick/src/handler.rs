//! Per-connection handler.
//!
//! Each accepted connection gets its own Tokio task running this handler:
//!   1. Register an outbox with the reactor (it answers with `welcome`)
//!   2. Spawn a writer draining the outbox into the socket
//!   3. Loop: receive envelopes → answer heartbeats, forward actions
//!   4. On exit, the guard tells the reactor the player is gone

use std::sync::Arc;
use std::time::Instant;

use cherrypick_protocol::{ClientMessage, Codec, Envelope, PlayerId, ServerMessage};
use cherrypick_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::CherryPickError;
use crate::reactor::{Outbox, ReactorEvent};
use crate::server::ServerState;

/// Drop guard that reports the disconnect when the handler exits.
///
/// Fires on every exit path, panics included. The send is synchronous, so
/// no task needs to be spawned from `drop`.
struct DisconnectGuard {
    player_id: PlayerId,
    events: mpsc::UnboundedSender<ReactorEvent>,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let _ = self.events.send(ReactorEvent::Disconnected {
            player_id: self.player_id,
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), CherryPickError> {
    let conn = Arc::new(conn);
    let player_id = PlayerId(conn.id().into_inner());
    let start = Instant::now();
    tracing::info!(%player_id, peer = %conn.peer_addr(), "player connected");

    let (outbox, outbox_rx) = mpsc::unbounded_channel();
    let connected = ReactorEvent::Connected {
        player_id,
        outbox: outbox.clone(),
    };
    if state.events.send(connected).is_err() {
        tracing::warn!(%player_id, "reactor is gone, refusing connection");
        return Ok(());
    }
    let _guard = DisconnectGuard {
        player_id,
        events: state.events.clone(),
    };

    let writer = tokio::spawn(write_loop(
        Arc::clone(&conn),
        Arc::clone(&state),
        outbox_rx,
        start,
    ));

    let result = read_loop(&conn, &state, player_id, &outbox, start).await;

    writer.abort();
    let _ = conn.close().await;
    tracing::info!(%player_id, "player disconnected");
    result
}

/// Reads until the peer leaves, goes quiet, or the reactor stops.
async fn read_loop<C: Codec>(
    conn: &WebSocketConnection,
    state: &ServerState<C>,
    player_id: PlayerId,
    outbox: &Outbox,
    start: Instant,
) -> Result<(), CherryPickError> {
    loop {
        let received = match state.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, conn.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    tracing::info!(%player_id, "connection idle for too long");
                    return Ok(());
                }
            },
            None => conn.recv().await,
        };

        let data = match received {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%player_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope<ClientMessage> = match state.codec.decode(&data) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "failed to decode envelope");
                let _ = outbox.send(ServerMessage::Error {
                    message: "Malformed message".into(),
                });
                continue;
            }
        };

        match envelope.payload {
            ClientMessage::Heartbeat { client_time } => {
                let _ = outbox.send(ServerMessage::HeartbeatAck {
                    client_time,
                    server_time: elapsed_ms(start),
                });
            }
            msg => {
                let action = ReactorEvent::Action { player_id, msg };
                if state.events.send(action).is_err() {
                    tracing::warn!(%player_id, "reactor is gone, closing connection");
                    return Ok(());
                }
            }
        }
    }
}

/// Wraps outbound messages in envelopes and writes them in order.
async fn write_loop<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    mut outbox: mpsc::UnboundedReceiver<ServerMessage>,
    start: Instant,
) {
    let mut seq: u64 = 1;
    while let Some(msg) = outbox.recv().await {
        let envelope = Envelope::new(next_seq(&mut seq), elapsed_ms(start), msg);
        let bytes = match state.codec.encode(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(conn_id = %conn.id(), error = %e, "failed to encode envelope");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "send failed, writer stopping");
            break;
        }
    }
}

/// Increments and returns the next sequence number.
fn next_seq(seq: &mut u64) -> u64 {
    let current = *seq;
    *seq += 1;
    current
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
