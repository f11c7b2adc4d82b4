//! Unified error type for the Codebreak crates.

use codebreak_protocol::ProtocolError;
use codebreak_secret::SecretError;
use codebreak_session::{ConfigError, SessionError};

/// Top-level error that wraps every layer's error.
///
/// Callers using the `codebreak` crate handle this one type instead of
/// importing errors from each sub-crate. The `#[from]` attributes let `?`
/// convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CodebreakError {
    /// A string that isn't a valid code.
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// An encode/decode failure or a malformed id.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A game rule was broken, or the session doesn't exist.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Engine or generator configuration that can't work.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CodebreakError {
    /// HTTP-style status for the error.
    ///
    /// Session errors carry their own mapping. Bad input from the caller
    /// is `422`, bad configuration is `500`.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Session(e) => e.status_code(),
            Self::Secret(_) | Self::Protocol(_) => 422,
            Self::Config(_) => 500,
        }
    }
}
