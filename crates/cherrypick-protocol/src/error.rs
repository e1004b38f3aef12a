//! Errors raised while encoding or decoding wire messages.

/// Something went wrong turning messages into bytes or back.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A value could not be serialized.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Incoming bytes were malformed or had the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Well-formed, but breaks a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
