//! Error types for the session layer.

use codebreak_protocol::{Phase, SessionId, Slot};
use codebreak_secret::SecretError;

/// Errors returned by session operations.
///
/// Every variant is an expected, caller-recoverable condition. None of
/// them mean the engine is broken, and each kind is distinct so a
/// transport can render its own message (see [`status_code`](Self::status_code)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No session has this id.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// Slot `B` is already taken.
    #[error("session {0} is full")]
    SessionFull(SessionId),

    /// The submitted secret is not 4 distinct digits from 1 to 9.
    #[error("invalid secret: {0}")]
    InvalidSecret(#[source] SecretError),

    /// The submitted guess is not 4 distinct digits from 1 to 9.
    #[error("invalid guess: {0}")]
    InvalidGuess(#[source] SecretError),

    /// The slot already committed a secret. Secrets are write-once.
    #[error("slot {slot} already committed a secret in session {session}")]
    AlreadyCommitted { session: SessionId, slot: Slot },

    /// The session is in the wrong phase for this operation, e.g. a guess
    /// before both secrets are in, or a secret before anyone has joined.
    #[error("session {session} is {phase}, which does not allow this operation")]
    NotInProgress { session: SessionId, phase: Phase },

    /// The slot guessed while it was the opponent's turn.
    #[error("it is not slot {slot}'s turn in session {session}")]
    OutOfTurn { session: SessionId, slot: Slot },

    /// The code generator kept producing ids that were already taken.
    #[error("could not allocate a fresh session id after {0} attempts")]
    GenerationExhausted(u32),
}

impl SessionError {
    /// An HTTP-style status code for this kind of failure.
    ///
    /// `404` unknown session, `422` malformed code, `409` a rule of the
    /// game was broken, `503` id space exhausted.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidSecret(_) | Self::InvalidGuess(_) => 422,
            Self::SessionFull(_)
            | Self::AlreadyCommitted { .. }
            | Self::NotInProgress { .. }
            | Self::OutOfTurn { .. } => 409,
            Self::GenerationExhausted(_) => 503,
        }
    }
}
