//! Secret codes for Codebreak: validation and match scoring.
//!
//! This is the leaf crate of the workspace. It knows nothing about
//! sessions, players, or turns. It only knows 4-digit codes:
//!
//! - **Validation** ([`validate`], [`Code::parse`]): is this string a
//!   legal secret or guess?
//! - **Scoring** ([`score`]): how close is a guess to a secret?
//!
//! # The rules
//!
//! A code is exactly four characters, each a digit from `1` to `9`
//! (zero is never allowed), with no digit repeated. `"1234"` and
//! `"9715"` are codes; `"1123"`, `"0123"` and `"12345"` are not.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← scores guesses against committed secrets
//!     ↕
//! Secret Layer (this crate)  ← validates and scores codes, no state
//! ```

mod code;
mod error;
mod score;

pub use code::{Code, CODE_LENGTH, validate};
pub use error::SecretError;
pub use score::{Score, score};
