//! The [`Code`] value type and the validation rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SecretError;

/// Number of digits in every secret and guess.
pub const CODE_LENGTH: usize = 4;

/// A validated code: four distinct digits from 1 to 9.
///
/// The only way to build a `Code` is through [`Code::parse`] (or its
/// `FromStr` / `TryFrom<String>` wrappers), so holding one proves the
/// string passed validation. Scoring takes `&Code`, which means the
/// "both arguments are valid" precondition can't be violated.
///
/// On the wire a code is its plain digit string: `Code` serializes as
/// `"1234"` and deserializing re-runs validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code([u8; CODE_LENGTH]);

impl Code {
    /// Parses and validates a code.
    ///
    /// Checks length first, then each character left to right, so the
    /// error names the first problem a player would notice.
    ///
    /// # Errors
    /// - [`SecretError::Length`]: not exactly 4 characters
    /// - [`SecretError::NotADigit`]: a non-digit character
    /// - [`SecretError::ZeroDigit`]: contains `0`
    /// - [`SecretError::RepeatedDigit`]: a digit appears twice
    pub fn parse(input: &str) -> Result<Self, SecretError> {
        let count = input.chars().count();
        if count != CODE_LENGTH {
            return Err(SecretError::Length(count));
        }

        let mut digits = [0u8; CODE_LENGTH];
        for (i, c) in input.chars().enumerate() {
            let value = c.to_digit(10).ok_or(SecretError::NotADigit(c))? as u8;
            if value == 0 {
                return Err(SecretError::ZeroDigit);
            }
            if digits[..i].contains(&value) {
                return Err(SecretError::RepeatedDigit(c));
            }
            digits[i] = value;
        }

        Ok(Self(digits))
    }

    /// The digit values, in position order.
    pub fn digits(&self) -> [u8; CODE_LENGTH] {
        self.0
    }

    /// Returns `true` if `digit` appears anywhere in the code.
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = SecretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// Returns `true` iff `code` is a legal secret or guess.
///
/// Equivalent to `Code::parse(code).is_ok()`.
pub fn validate(code: &str) -> bool {
    Code::parse(code).is_ok()
}
