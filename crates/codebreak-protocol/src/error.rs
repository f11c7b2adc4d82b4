//! Error types for the protocol layer.
//!
//! Each crate in Codebreak defines its own error enum. When you see a
//! `ProtocolError`, the problem is in encoding, decoding, or parsing
//! caller input, not in the game rules.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing fields, or a code that
    /// fails validation (codes re-validate on the way in).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Input that decodes fine but can't be used, e.g. a blank room code.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
