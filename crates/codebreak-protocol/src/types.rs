//! Core value types that cross the engine boundary.
//!
//! Everything here is plain data: cheap to clone, serializable, and free
//! of locks or handles. The session layer builds these; callers read them.

use std::fmt;

use codebreak_secret::{Code, Score};
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The room code players share to find each other's session.
///
/// A newtype around `String` so a room code can't be confused with a
/// player name or a guess. `#[serde(transparent)]` keeps it a bare string
/// on the wire: `SessionId("K7QZ")` is just `"K7QZ"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an id exactly as given (used for generator output).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses a room code typed by a player.
    ///
    /// Surrounding whitespace is trimmed and letters are uppercased, so
    /// `" k7qz "` reaches room `K7QZ`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if nothing is left after
    /// trimming or the code contains whitespace or control characters.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "room code is empty".into(),
            ));
        }
        if let Some(c) =
            trimmed.chars().find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ProtocolError::InvalidMessage(format!(
                "room code {trimmed:?} contains invalid character {c:?}"
            )));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two seats in a session.
///
/// `A` is always the player who created the session and always moves
/// first; `B` is whoever joined. A slot is a role, not an identity.
/// Binding a real caller to a slot is the transport's job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// Both slots, in turn order.
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];

    /// The opposing slot.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Position of this slot in a two-element array (`A` = 0, `B` = 1).
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Where a caller sits after creating or joining a session.
///
/// The transport should remember this pairing (cookie, token, whatever
/// it uses) and pass `slot` back on every later call for `session_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub session_id: SessionId,
    pub slot: Slot,
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a session.
///
/// Transitions are strictly ordered, with no skipping and no going back:
///
/// ```text
/// AwaitingPlayers → AwaitingSecrets → InProgress → Finished
/// ```
///
/// - **AwaitingPlayers**: created by `A`, waiting for `B` to join.
/// - **AwaitingSecrets**: both seated, at least one secret missing.
/// - **InProgress**: both secrets committed, guesses alternate.
/// - **Finished**: someone guessed exactly. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingPlayers,
    AwaitingSecrets,
    InProgress,
    Finished,
}

impl Phase {
    /// Returns `true` if a second player may still join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::AwaitingPlayers)
    }

    /// Returns `true` once the game has been decided.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// The phase that follows this one, or `None` from `Finished`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::AwaitingPlayers => Some(Self::AwaitingSecrets),
            Self::AwaitingSecrets => Some(Self::InProgress),
            Self::InProgress => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if moving to `target` is a legal single step.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingPlayers => write!(f, "AwaitingPlayers"),
            Self::AwaitingSecrets => write!(f, "AwaitingSecrets"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Guesses
// ---------------------------------------------------------------------------

/// One accepted guess, as stored in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// 0-based position in the history.
    pub sequence: usize,
    /// Who guessed.
    pub slot: Slot,
    /// What they guessed.
    pub code: Code,
    /// Guess digits present anywhere in the opponent's secret.
    pub digit_matches: u8,
    /// Guess digits in the right position.
    pub exact_matches: u8,
}

impl GuessRecord {
    /// The feedback half of the record.
    pub fn score(&self) -> Score {
        Score {
            digit_matches: self.digit_matches,
            exact_matches: self.exact_matches,
        }
    }
}

/// Both committed secrets, revealed once a game is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedSecrets {
    pub a: Code,
    pub b: Code,
}

impl RevealedSecrets {
    /// The secret `slot` committed.
    pub fn for_slot(&self, slot: Slot) -> Code {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        }
    }
}

/// What a guess did to the game.
///
/// `#[serde(tag = "type")]` gives the internally tagged form
/// `{ "type": "Won", "winner": "A", ... }`, which is easy to switch on
/// from JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GuessOutcome {
    /// Not solved; the opponent moves next.
    Continue { next_turn: Slot },

    /// Solved. The game is over and both secrets can be shown.
    Won {
        winner: Slot,
        winner_name: Option<String>,
        secrets: RevealedSecrets,
    },
}

/// The reply to an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// The record that was appended to the history.
    pub record: GuessRecord,
    /// Whether the guess ended the game.
    pub outcome: GuessOutcome,
}

impl GuessResult {
    /// Returns `true` if this guess won the game.
    pub fn is_winning(&self) -> bool {
        matches!(self.outcome, GuessOutcome::Won { .. })
    }

    /// The feedback for this guess.
    pub fn score(&self) -> Score {
        self.record.score()
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// What anyone polling a session may know about one seat.
///
/// `committed` says whether a secret is in, never what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: Slot,
    pub name: Option<String>,
    pub joined: bool,
    pub committed: bool,
}

/// A read-only snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: SessionId,
    pub phase: Phase,
    /// Who moves next. `None` until the game starts; after a win it stays
    /// on the winner.
    pub turn: Option<Slot>,
    /// Indexed by [`Slot::index`].
    pub players: [PlayerView; 2],
    pub history: Vec<GuessRecord>,
    pub winner: Option<Slot>,
    /// Both secrets, present only when `phase` is `Finished`.
    pub secrets: Option<RevealedSecrets>,
}

impl SessionView {
    /// The seat view for `slot`.
    pub fn player(&self, slot: Slot) -> &PlayerView {
        &self.players[slot.index()]
    }

    /// The winner's display name, if the game is over and they gave one.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner
            .and_then(|slot| self.player(slot).name.as_deref())
    }

    /// Guesses made by `slot`, oldest first.
    pub fn guesses_by(&self, slot: Slot) -> impl Iterator<Item = &GuessRecord> {
        self.history.iter().filter(move |g| g.slot == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        Code::parse(s).unwrap()
    }

    #[test]
    fn test_session_id_parse_trims_and_uppercases() {
        let id = SessionId::parse("  k7qz\n").unwrap();
        assert_eq!(id.as_str(), "K7QZ");
        assert_eq!(id, SessionId::new("K7QZ"));
    }

    #[test]
    fn test_session_id_parse_empty_returns_error() {
        assert!(matches!(
            SessionId::parse("   "),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_session_id_parse_inner_space_returns_error() {
        assert!(SessionId::parse("AB CD").is_err());
    }

    #[test]
    fn test_session_id_parse_control_char_names_it() {
        match SessionId::parse("AB\u{7}CD") {
            Err(ProtocolError::InvalidMessage(msg)) => {
                assert!(msg.contains("'\\u{7}'"), "unexpected message: {msg}");
                assert!(!msg.contains("whitespace"));
            }
            other => panic!("expected InvalidMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_session_id_serializes_as_bare_string() {
        let json = serde_json::to_string(&SessionId::new("AB12")).unwrap();
        assert_eq!(json, "\"AB12\"");
    }

    #[test]
    fn test_slot_other_flips() {
        assert_eq!(Slot::A.other(), Slot::B);
        assert_eq!(Slot::B.other(), Slot::A);
        assert_eq!(Slot::A.other().other(), Slot::A);
    }

    #[test]
    fn test_slot_index_matches_all_order() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_phase_next_follows_strict_order() {
        assert_eq!(
            Phase::AwaitingPlayers.next(),
            Some(Phase::AwaitingSecrets)
        );
        assert_eq!(Phase::AwaitingSecrets.next(), Some(Phase::InProgress));
        assert_eq!(Phase::InProgress.next(), Some(Phase::Finished));
        assert_eq!(Phase::Finished.next(), None);
    }

    #[test]
    fn test_phase_can_transition_to_rejects_skips_and_regressions() {
        assert!(Phase::AwaitingPlayers.can_transition_to(Phase::AwaitingSecrets));
        assert!(!Phase::AwaitingPlayers.can_transition_to(Phase::InProgress));
        assert!(!Phase::Finished.can_transition_to(Phase::InProgress));
        assert!(!Phase::InProgress.can_transition_to(Phase::InProgress));
    }

    #[test]
    fn test_phase_predicates() {
        assert!(Phase::AwaitingPlayers.is_joinable());
        assert!(!Phase::AwaitingSecrets.is_joinable());
        assert!(Phase::Finished.is_finished());
        assert!(!Phase::InProgress.is_finished());
    }

    #[test]
    fn test_guess_outcome_is_internally_tagged() {
        let outcome = GuessOutcome::Continue { next_turn: Slot::B };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["type"], "Continue");
        assert_eq!(json["next_turn"], "B");
    }

    #[test]
    fn test_guess_result_is_winning() {
        let record = GuessRecord {
            sequence: 0,
            slot: Slot::A,
            code: code("5678"),
            digit_matches: 4,
            exact_matches: 4,
        };
        let won = GuessResult {
            record: record.clone(),
            outcome: GuessOutcome::Won {
                winner: Slot::A,
                winner_name: Some("Ada".into()),
                secrets: RevealedSecrets { a: code("1234"), b: code("5678") },
            },
        };
        let lost = GuessResult {
            record,
            outcome: GuessOutcome::Continue { next_turn: Slot::B },
        };

        assert!(won.is_winning());
        assert!(won.score().is_win());
        assert!(!lost.is_winning());
    }

    #[test]
    fn test_revealed_secrets_for_slot() {
        let secrets = RevealedSecrets { a: code("1234"), b: code("5678") };
        assert_eq!(secrets.for_slot(Slot::A), code("1234"));
        assert_eq!(secrets.for_slot(Slot::B), code("5678"));
    }

    #[test]
    fn test_session_view_winner_name_and_guesses_by() {
        let view = SessionView {
            id: SessionId::new("ROOM"),
            phase: Phase::Finished,
            turn: Some(Slot::B),
            players: [
                PlayerView { slot: Slot::A, name: Some("Ada".into()), joined: true, committed: true },
                PlayerView { slot: Slot::B, name: Some("Bo".into()), joined: true, committed: true },
            ],
            history: vec![
                GuessRecord { sequence: 0, slot: Slot::A, code: code("1234"), digit_matches: 2, exact_matches: 0 },
                GuessRecord { sequence: 1, slot: Slot::B, code: code("1234"), digit_matches: 4, exact_matches: 4 },
            ],
            winner: Some(Slot::B),
            secrets: Some(RevealedSecrets { a: code("1234"), b: code("4915") }),
        };

        assert_eq!(view.winner_name(), Some("Bo"));
        assert_eq!(view.guesses_by(Slot::A).count(), 1);
        assert_eq!(view.guesses_by(Slot::B).next().map(|g| g.sequence), Some(1));
    }
}
