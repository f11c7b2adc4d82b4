//! Codec trait and implementations for serializing/deserializing views.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The engine hands out plain Rust values ([`SessionView`](crate::SessionView),
//! [`GuessResult`](crate::GuessResult)); whatever transport sits in front
//! of it picks a codec to put them on the wire.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` so a single codec can be shared by every
/// request handler task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable, which is what a polling web page or a terminal dump
/// wants. Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use codebreak_protocol::{Codec, JsonCodec, Slot};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Slot::B).unwrap();
/// assert_eq!(bytes, b"\"B\"");
///
/// let decoded: Slot = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, Slot::B);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
