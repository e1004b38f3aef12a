//! Byte encoding for envelopes.
//!
//! The [`Codec`] trait is the seam between typed messages and the bytes a
//! transport moves. [`JsonCodec`] is the only implementation today; the
//! browser client speaks JSON.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Turns values into bytes and back.
///
/// `Send + Sync + 'static` because one codec instance is shared by every
/// connection task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes a value.
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] for malformed or mismatched input.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// JSON via `serde_json`. Output is always valid UTF-8, so transports may
/// send it as text frames.
///
/// ```rust
/// use cherrypick_protocol::{ClientMessage, Codec, Envelope, JsonCodec};
///
/// let codec = JsonCodec;
/// let env = Envelope::new(1, 0, ClientMessage::StartGame);
/// let bytes = codec.encode(&env).unwrap();
/// let back: Envelope<ClientMessage> = codec.decode(&bytes).unwrap();
/// assert_eq!(env, back);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
