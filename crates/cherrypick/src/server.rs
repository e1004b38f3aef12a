//! `CherryPickServer` builder and accept loop.
//!
//! Ties the layers together: transport → handler → reactor → orchestrator.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use cherrypick_protocol::{Codec, JsonCodec};
use cherrypick_room::{BotPolicy, RandomBotPolicy, RoomConfig, RoomRegistry, SessionOrchestrator};
use cherrypick_transport::{Incoming, Transport, WebSocketTransport};
use tokio::sync::mpsc;

use crate::handler::handle_connection;
use crate::reactor::{Reactor, ReactorEvent};
use crate::{CherryPickError, ServerConfig};

/// What every connection task shares.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) events: mpsc::UnboundedSender<ReactorEvent>,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Option<Duration>,
}

/// Builder for configuring and starting a Cherry Pick server.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use cherrypick::prelude::*;
///
/// # async fn start() -> Result<(), CherryPickError> {
/// let server = CherryPickServer::builder()
///     .bind("0.0.0.0:3001")
///     .reveal_delay(Duration::from_secs(5))
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct CherryPickServerBuilder {
    config: ServerConfig,
}

impl CherryPickServerBuilder {
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    /// Drops connections that stay silent this long. `None` disables it.
    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn room_config(mut self, room: RoomConfig) -> Self {
        self.config.room = room;
        self
    }

    /// How long round results stay up before the next round.
    pub fn reveal_delay(mut self, delay: Duration) -> Self {
        self.config.room.reveal_delay = delay;
        self
    }

    /// Binds the listener with randomly playing bots.
    pub async fn build(self) -> Result<CherryPickServer<RandomBotPolicy>, CherryPickError> {
        self.build_with_bots(RandomBotPolicy::new()).await
    }

    /// Binds the listener with a custom bot policy.
    pub async fn build_with_bots<B: BotPolicy>(
        self,
        bots: B,
    ) -> Result<CherryPickServer<B>, CherryPickError> {
        let transport = WebSocketTransport::bind(self.config.bind_addr.as_str()).await?;

        let registry = RoomRegistry::new(self.config.room);
        let orchestrator = SessionOrchestrator::new(registry, bots);
        let (tx, rx) = mpsc::unbounded_channel();
        let reactor = Reactor::new(orchestrator, tx.clone(), rx);

        let state = Arc::new(ServerState {
            events: tx,
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
        });

        Ok(CherryPickServer {
            transport,
            reactor,
            state,
        })
    }
}

impl Default for CherryPickServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound, not yet running, Cherry Pick server.
///
/// Call [`run()`](Self::run) to start the reactor and accept connections.
pub struct CherryPickServer<B: BotPolicy = RandomBotPolicy> {
    transport: WebSocketTransport,
    reactor: Reactor<B>,
    state: Arc<ServerState<JsonCodec>>,
}

impl CherryPickServer<RandomBotPolicy> {
    pub fn builder() -> CherryPickServerBuilder {
        CherryPickServerBuilder::new()
    }
}

impl<B: BotPolicy> CherryPickServer<B> {
    /// The address the listener is bound to. Useful after binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, CherryPickError> {
        Ok(self.transport.local_addr()?)
    }

    /// Starts the reactor and runs the accept loop until the process is
    /// terminated.
    pub async fn run(self) -> Result<(), CherryPickError> {
        let Self {
            mut transport,
            reactor,
            state,
        } = self;

        tokio::spawn(reactor.run());
        tracing::info!(addr = ?transport.local_addr().ok(), "Cherry Pick server running");

        loop {
            match transport.accept().await {
                Ok(incoming) => {
                    let state = Arc::clone(&state);
                    tokio::spawn(async move {
                        let peer = incoming.peer_addr();
                        let conn = match incoming.upgrade().await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%peer, error = %e, "handshake failed");
                                return;
                            }
                        };
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}
