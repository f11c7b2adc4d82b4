//! Caller-facing types for Codebreak.
//!
//! This crate defines the "language" the engine speaks to whatever sits
//! in front of it (an HTTP handler, a terminal, a test):
//!
//! - **Identity** ([`SessionId`], [`Slot`]): which game, which seat.
//! - **Lifecycle** ([`Phase`]): where a session is in its state machine.
//! - **Results and views** ([`GuessRecord`], [`GuessResult`],
//!   [`SessionView`]): what callers get back.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Secret (Code, Score) → Protocol (ids, views) → Session (engine)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    GuessOutcome, GuessRecord, GuessResult, Phase, PlayerView,
    RevealedSecrets, Seat, SessionId, SessionView, Slot,
};
