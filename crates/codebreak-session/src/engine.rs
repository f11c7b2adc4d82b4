//! The session engine: the public face of this crate.
//!
//! [`SessionEngine`] turns caller requests into store updates. Each
//! mutating call is one [`SessionStore::update`], so the rules in
//! [`Session`] always see a consistent snapshot and a rejected call
//! leaves nothing behind.

use codebreak_protocol::{GuessResult, Phase, Seat, SessionId, SessionView, Slot};

use crate::{
    CodeGenerator, ConfigError, EngineConfig, MemoryStore, RandomCodeGenerator, Session,
    SessionError, SessionStore,
};

/// Runs two-player sessions on top of a store and an id generator.
///
/// The engine holds no session state itself. Share it across tasks with
/// an `Arc`; every method takes `&self`.
///
/// ```rust
/// use codebreak_protocol::Slot;
/// use codebreak_session::SessionEngine;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let engine = SessionEngine::in_memory();
///
/// let seat = engine.create_session("Ada").await.unwrap();
/// engine.join_session(&seat.session_id, "Bo").await.unwrap();
/// engine.submit_secret(&seat.session_id, Slot::A, "1234").await.unwrap();
/// engine.submit_secret(&seat.session_id, Slot::B, "5678").await.unwrap();
///
/// let result = engine.submit_guess(&seat.session_id, Slot::A, "5678").await.unwrap();
/// assert!(result.is_winning());
/// # });
/// ```
#[derive(Debug)]
pub struct SessionEngine<S = MemoryStore, G = RandomCodeGenerator> {
    store: S,
    generator: G,
    config: EngineConfig,
}

impl SessionEngine {
    /// An engine over a fresh [`MemoryStore`] with random 4-character
    /// room codes and default config.
    pub fn in_memory() -> Self {
        Self {
            store: MemoryStore::new(),
            generator: RandomCodeGenerator::default(),
            config: EngineConfig::default(),
        }
    }
}

impl<S, G> SessionEngine<S, G>
where
    S: SessionStore,
    G: CodeGenerator,
{
    /// Creates an engine after checking `config`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `config` can't work, e.g.
    /// `max_id_attempts` of 0.
    pub fn new(
        store: S,
        generator: G,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, generator, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- Operations -------------------------------------------------------

    /// Opens a session with the caller seated as `A`.
    ///
    /// Draws ids until one is free, at most `max_id_attempts` times.
    ///
    /// # Errors
    /// [`SessionError::GenerationExhausted`] if every drawn id was taken.
    pub async fn create_session(
        &self,
        initiator_name: &str,
    ) -> Result<Seat, SessionError> {
        let attempts = self.config.max_id_attempts;

        for attempt in 1..=attempts {
            let id = SessionId::new(self.generator.generate());
            let session = Session::new(id.clone(), initiator_name);

            if self.store.insert_new(session).await {
                tracing::info!(session_id = %id, attempt, "session created");
                return Ok(Seat { session_id: id, slot: Slot::A });
            }
            tracing::warn!(session_id = %id, attempt, "session id collision, regenerating");
        }

        tracing::warn!(attempts, "gave up allocating a session id");
        Err(SessionError::GenerationExhausted(attempts))
    }

    /// Seats the caller as `B`.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`]: unknown id
    /// - [`SessionError::SessionFull`]: `B` is already taken
    pub async fn join_session(
        &self,
        id: &SessionId,
        joiner_name: &str,
    ) -> Result<Slot, SessionError> {
        let result = self.store.update(id, |s| s.join(joiner_name)).await;
        match &result {
            Ok(slot) => tracing::info!(session_id = %id, %slot, "player joined"),
            Err(e) => tracing::debug!(session_id = %id, error = %e, "join rejected"),
        }
        result
    }

    /// Commits `slot`'s secret. Returns the phase afterwards, which is
    /// `InProgress` once both players have committed.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`]: unknown id
    /// - [`SessionError::InvalidSecret`]: not 4 distinct digits 1–9
    /// - [`SessionError::AlreadyCommitted`]: `slot` already has a secret
    /// - [`SessionError::NotInProgress`]: `B` hasn't joined yet
    pub async fn submit_secret(
        &self,
        id: &SessionId,
        slot: Slot,
        code: &str,
    ) -> Result<Phase, SessionError> {
        let result = self.store.update(id, |s| s.commit_secret(slot, code)).await;
        match &result {
            Ok(Phase::InProgress) => {
                tracing::info!(session_id = %id, %slot, "secret committed, game started");
            }
            Ok(phase) => {
                tracing::info!(session_id = %id, %slot, %phase, "secret committed");
            }
            Err(e) => {
                tracing::debug!(session_id = %id, %slot, error = %e, "secret rejected");
            }
        }
        result
    }

    /// Scores `slot`'s guess against the opponent's secret.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`]: unknown id
    /// - [`SessionError::NotInProgress`]: the game isn't running
    /// - [`SessionError::OutOfTurn`]: it's the opponent's move
    /// - [`SessionError::InvalidGuess`]: not 4 distinct digits 1–9
    pub async fn submit_guess(
        &self,
        id: &SessionId,
        slot: Slot,
        code: &str,
    ) -> Result<GuessResult, SessionError> {
        let result = self.store.update(id, |s| s.apply_guess(slot, code)).await;
        match &result {
            Ok(r) if r.is_winning() => {
                tracing::info!(
                    session_id = %id,
                    winner = %slot,
                    guesses = r.record.sequence + 1,
                    "game won"
                );
            }
            Ok(r) => {
                tracing::debug!(
                    session_id = %id,
                    %slot,
                    digit_matches = r.record.digit_matches,
                    exact_matches = r.record.exact_matches,
                    "guess scored"
                );
            }
            Err(e) => {
                tracing::debug!(session_id = %id, %slot, error = %e, "guess rejected");
            }
        }
        result
    }

    /// A snapshot of the session for display or polling.
    ///
    /// # Errors
    /// [`SessionError::NotFound`] for an unknown id.
    pub async fn get_session(
        &self,
        id: &SessionId,
    ) -> Result<SessionView, SessionError> {
        self.store
            .get(id)
            .await
            .map(|s| s.view())
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    /// How many sessions the store currently holds.
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }
}
