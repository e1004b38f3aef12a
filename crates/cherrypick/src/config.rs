//! Server configuration.

use std::time::Duration;

use cherrypick_room::RoomConfig;

/// Everything [`CherryPickServer`](crate::CherryPickServer) needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind_addr: String,

    /// A connection that sends nothing for this long is dropped. `None`
    /// keeps idle connections open forever.
    pub idle_timeout: Option<Duration>,

    pub room: RoomConfig,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 3001;
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{}", Self::DEFAULT_PORT),
            idle_timeout: Some(Duration::from_secs(60)),
            room: RoomConfig::default(),
        }
    }
}
