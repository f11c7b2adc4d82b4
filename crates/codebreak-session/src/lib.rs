//! The Codebreak session engine.
//!
//! This crate owns the two-player game lifecycle:
//!
//! 1. **Creation**: player `A` opens a session under a fresh room code
//!    ([`SessionEngine::create_session`], [`CodeGenerator`])
//! 2. **Pairing**: player `B` joins by room code
//! 3. **Commitment**: each player locks in a secret, exactly once
//! 4. **Play**: alternating guesses, scored by `codebreak-secret`, until
//!    one lands exactly
//!
//! Sessions live in a [`SessionStore`]. The engine only asks the store for
//! atomic per-session updates, so any backend that can serialize writes to
//! one key works; [`MemoryStore`] is the in-process one.
//!
//! # How it fits in the stack
//!
//! ```text
//! Transport (outside)  ← maps callers to slots, renders results
//!     ↕
//! Session Layer (this crate)  ← state machine, turn order, win detection
//!     ↕
//! Protocol + Secret Layers (below)  ← ids, views, code rules
//! ```

mod config;
mod engine;
mod error;
mod generator;
mod session;
mod store;

pub use config::{ConfigError, EngineConfig, GeneratorConfig};
pub use engine::SessionEngine;
pub use error::SessionError;
pub use generator::{CodeGenerator, RandomCodeGenerator};
pub use session::{PlayerSlot, Session};
pub use store::{MemoryStore, SessionStore};
