//! Feedback scoring: how close is a guess to a secret?

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CODE_LENGTH, Code};

/// Feedback for one guess.
///
/// Always `exact_matches <= digit_matches <= 4`: a digit in the right
/// place is also a digit that's present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Guess digits that appear anywhere in the secret.
    pub digit_matches: u8,
    /// Guess digits in the same position as in the secret.
    pub exact_matches: u8,
}

impl Score {
    /// Returns `true` if the guess is the secret.
    pub fn is_win(&self) -> bool {
        usize::from(self.exact_matches) == CODE_LENGTH
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correct, {} in position",
            self.digit_matches, self.exact_matches
        )
    }
}

/// Scores `guess` against `secret`.
///
/// `digit_matches` sums, for each digit value, the smaller of its count in
/// the secret and its count in the guess. Codes never repeat a digit, so
/// this is just "guess digits present in the secret", but the general
/// form keeps the function honest if that rule ever loosens.
pub fn score(secret: &Code, guess: &Code) -> Score {
    let secret = secret.digits();
    let guess = guess.digits();

    let exact_matches = secret
        .iter()
        .zip(guess.iter())
        .filter(|(s, g)| s == g)
        .count();

    let digit_matches: usize = (1..=9u8)
        .map(|d| {
            let in_secret = secret.iter().filter(|&&s| s == d).count();
            let in_guess = guess.iter().filter(|&&g| g == d).count();
            in_secret.min(in_guess)
        })
        .sum();

    Score {
        digit_matches: digit_matches as u8,
        exact_matches: exact_matches as u8,
    }
}
