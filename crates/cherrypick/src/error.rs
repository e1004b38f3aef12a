//! Unified error type for the Cherry Pick server.

use cherrypick_protocol::ProtocolError;
use cherrypick_transport::TransportError;

/// Top-level error wrapping every crate-specific error.
///
/// `#[from]` lets `?` lift sub-crate errors without ceremony.
#[derive(Debug, thiserror::Error)]
pub enum CherryPickError {
    /// Binding, accepting, sending or receiving failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A message could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
