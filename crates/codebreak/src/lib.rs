//! # Codebreak
//!
//! A two-player game engine: each player commits a secret code of four
//! distinct digits from 1 to 9, then they take turns guessing the
//! opponent's code until one guess is exact.
//!
//! This crate ties the layers together:
//!
//! - `codebreak-secret`: code validation and scoring
//! - `codebreak-protocol`: ids, views and the wire codec
//! - `codebreak-session`: the session engine and its store
//!
//! ## Quick Start
//!
//! ```rust
//! use codebreak::prelude::*;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let engine = EngineBuilder::new().build()?;
//!
//! let seat = engine.create_session("Ada").await?;
//! let room = seat.session_id;
//! engine.join_session(&room, "Bo").await?;
//! engine.submit_secret(&room, Slot::A, "1234").await?;
//! engine.submit_secret(&room, Slot::B, "5678").await?;
//!
//! let result = engine.submit_guess(&room, Slot::A, "5679").await?;
//! assert_eq!(result.score().exact_matches, 3);
//! # Ok::<(), CodebreakError>(())
//! # }).unwrap();
//! ```

mod builder;
mod error;
mod logging;

pub use builder::EngineBuilder;
pub use error::CodebreakError;
pub use logging::init_tracing;

pub use codebreak_protocol as protocol;
pub use codebreak_secret as secret;
pub use codebreak_session as session;

/// Everything a caller usually needs, in one import.
pub mod prelude {
    pub use crate::{CodebreakError, EngineBuilder, init_tracing};

    pub use codebreak_protocol::{
        Codec, GuessOutcome, GuessRecord, GuessResult, JsonCodec, Phase,
        PlayerView, RevealedSecrets, Seat, SessionId, SessionView, Slot,
    };
    pub use codebreak_secret::{Code, Score, validate};
    pub use codebreak_session::{
        CodeGenerator, ConfigError, EngineConfig, GeneratorConfig, MemoryStore,
        RandomCodeGenerator, SessionEngine, SessionError, SessionStore,
    };
}
