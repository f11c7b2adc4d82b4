//! Error types for the secret layer.

/// Reasons a string is not a valid code.
///
/// The boolean [`validate`](crate::validate) collapses all of these into
/// `false`; [`Code::parse`](crate::Code::parse) keeps the reason so a
/// caller can tell the player what to fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    /// The input does not have exactly four characters.
    #[error("code must be exactly 4 digits, got {0} characters")]
    Length(usize),

    /// A character outside `0`–`9`.
    #[error("code may only contain digits, found {0:?}")]
    NotADigit(char),

    /// The digit `0`, which the game excludes.
    #[error("code may not contain the digit 0")]
    ZeroDigit,

    /// The same digit appears twice.
    #[error("code digits must be distinct, {0:?} repeats")]
    RepeatedDigit(char),
}
