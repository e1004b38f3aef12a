/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listening socket could not be bound.
    #[error("bind failed: {0}")]
    BindFailed(#[source] std::io::Error),

    /// A TCP accept failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// The peer's upgrade request was invalid or never arrived.
    #[error("handshake failed: {0}")]
    HandshakeFailed(#[source] std::io::Error),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The listener's address could not be read.
    #[error("local address unavailable: {0}")]
    LocalAddr(#[source] std::io::Error),
}
