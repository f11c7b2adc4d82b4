//! The session record and its state machine.
//!
//! A [`Session`] is plain data plus the rules for changing it. It does no
//! locking and no I/O: the engine runs these methods inside the store's
//! per-session critical section, so each one sees a consistent snapshot
//! and either applies completely or returns an error.
//!
//! ```text
//! AwaitingPlayers ──join──→ AwaitingSecrets ──both secrets──→ InProgress ──exact 4──→ Finished
//! ```

use codebreak_protocol::{
    GuessOutcome, GuessRecord, GuessResult, Phase, PlayerView,
    RevealedSecrets, SessionId, SessionView, Slot,
};
use codebreak_secret::{Code, score};
use serde::{Deserialize, Serialize};

use crate::SessionError;

// ---------------------------------------------------------------------------
// PlayerSlot
// ---------------------------------------------------------------------------

/// One seat at the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Someone occupies this seat.
    pub joined: bool,
    /// The committed secret. Write-once.
    pub secret: Option<Code>,
    /// Display name, if the player gave a non-blank one.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A two-player game from creation to its winning guess.
///
/// Fields are private so the invariants can only change through the
/// transition methods:
/// - a slot's secret never changes once set,
/// - `phase` only moves forward,
/// - `winner` is `Some` exactly when `phase` is `Finished`,
/// - `history` only grows, in turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    players: [PlayerSlot; 2],
    turn: Slot,
    phase: Phase,
    history: Vec<GuessRecord>,
    winner: Option<Slot>,
}

impl Session {
    /// Opens a session with `A` seated and `B` empty.
    pub fn new(id: SessionId, initiator_name: &str) -> Self {
        let creator = PlayerSlot {
            joined: true,
            secret: None,
            name: clean_name(initiator_name),
        };
        Self {
            id,
            players: [creator, PlayerSlot::default()],
            turn: Slot::A,
            phase: Phase::AwaitingPlayers,
            history: Vec::new(),
            winner: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Who moves next. Only meaningful while `InProgress`; after a win it
    /// stays on the winner.
    pub fn turn(&self) -> Slot {
        self.turn
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn player(&self, slot: Slot) -> &PlayerSlot {
        &self.players[slot.index()]
    }

    // -- Transitions ------------------------------------------------------

    /// Seats the second player.
    ///
    /// # Errors
    /// [`SessionError::SessionFull`] if `B` is already seated.
    pub fn join(&mut self, joiner_name: &str) -> Result<Slot, SessionError> {
        let seat = &mut self.players[Slot::B.index()];
        if seat.joined || !self.phase.is_joinable() {
            return Err(SessionError::SessionFull(self.id.clone()));
        }

        seat.joined = true;
        seat.name = clean_name(joiner_name);
        self.advance(Phase::AwaitingSecrets);
        Ok(Slot::B)
    }

    /// Commits `slot`'s secret. When both are in, the game starts with
    /// `A` to move.
    ///
    /// Checks run in this order: code validity, write-once, phase. A slot
    /// that already committed always gets `AlreadyCommitted`, whatever the
    /// phase is by now.
    ///
    /// # Errors
    /// - [`SessionError::InvalidSecret`]: `input` is not a valid code
    /// - [`SessionError::AlreadyCommitted`]: `slot` already has a secret
    /// - [`SessionError::NotInProgress`]: nobody has joined yet
    pub fn commit_secret(
        &mut self,
        slot: Slot,
        input: &str,
    ) -> Result<Phase, SessionError> {
        let code = Code::parse(input).map_err(SessionError::InvalidSecret)?;

        if self.players[slot.index()].secret.is_some() {
            return Err(SessionError::AlreadyCommitted {
                session: self.id.clone(),
                slot,
            });
        }
        if self.phase != Phase::AwaitingSecrets {
            return Err(SessionError::NotInProgress {
                session: self.id.clone(),
                phase: self.phase,
            });
        }

        self.players[slot.index()].secret = Some(code);

        if self.players.iter().all(|p| p.secret.is_some()) {
            self.turn = Slot::A;
            self.advance(Phase::InProgress);
        }
        Ok(self.phase)
    }

    /// Scores `slot`'s guess against the opponent's secret and records it.
    ///
    /// Rejected guesses leave the session untouched: nothing is appended
    /// and the turn doesn't move.
    ///
    /// # Errors
    /// - [`SessionError::NotInProgress`]: the game isn't running
    /// - [`SessionError::OutOfTurn`]: it's the opponent's move
    /// - [`SessionError::InvalidGuess`]: `input` is not a valid code
    pub fn apply_guess(
        &mut self,
        slot: Slot,
        input: &str,
    ) -> Result<GuessResult, SessionError> {
        if self.phase != Phase::InProgress {
            return Err(self.not_in_progress());
        }
        if slot != self.turn {
            return Err(SessionError::OutOfTurn {
                session: self.id.clone(),
                slot,
            });
        }
        let guess = Code::parse(input).map_err(SessionError::InvalidGuess)?;

        // Both secrets are set in InProgress; the `else` only guards a
        // hand-built or corrupted record.
        let Some(secret) = self.players[slot.other().index()].secret else {
            return Err(self.not_in_progress());
        };

        let result = score(&secret, &guess);
        let record = GuessRecord {
            sequence: self.history.len(),
            slot,
            code: guess,
            digit_matches: result.digit_matches,
            exact_matches: result.exact_matches,
        };
        self.history.push(record.clone());

        let outcome = if result.is_win() {
            self.winner = Some(slot);
            self.advance(Phase::Finished);
            match self.revealed_secrets() {
                Some(secrets) => GuessOutcome::Won {
                    winner: slot,
                    winner_name: self.player(slot).name.clone(),
                    secrets,
                },
                None => return Err(self.not_in_progress()),
            }
        } else {
            self.turn = slot.other();
            GuessOutcome::Continue { next_turn: self.turn }
        };

        Ok(GuessResult { record, outcome })
    }

    // -- Views ------------------------------------------------------------

    /// A snapshot safe to show either player. Secrets appear only once
    /// the game is finished.
    pub fn view(&self) -> SessionView {
        let players = Slot::ALL.map(|slot| {
            let p = self.player(slot);
            PlayerView {
                slot,
                name: p.name.clone(),
                joined: p.joined,
                committed: p.secret.is_some(),
            }
        });

        let turn = match self.phase {
            Phase::InProgress | Phase::Finished => Some(self.turn),
            Phase::AwaitingPlayers | Phase::AwaitingSecrets => None,
        };

        let secrets = if self.phase.is_finished() {
            self.revealed_secrets()
        } else {
            None
        };

        SessionView {
            id: self.id.clone(),
            phase: self.phase,
            turn,
            players,
            history: self.history.clone(),
            winner: self.winner,
            secrets,
        }
    }

    // -- Internals --------------------------------------------------------

    fn advance(&mut self, target: Phase) {
        debug_assert!(
            self.phase.can_transition_to(target),
            "illegal phase transition {} -> {}",
            self.phase,
            target
        );
        self.phase = target;
    }

    fn revealed_secrets(&self) -> Option<RevealedSecrets> {
        Some(RevealedSecrets {
            a: self.players[Slot::A.index()].secret?,
            b: self.players[Slot::B.index()].secret?,
        })
    }

    fn not_in_progress(&self) -> SessionError {
        SessionError::NotInProgress {
            session: self.id.clone(),
            phase: self.phase,
        }
    }
}

/// Trims a player name; blank names are treated as absent.
fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =========================================================================
// Tests
// =========================================================================
