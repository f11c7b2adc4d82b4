//! `EngineBuilder`: wires config, store and id generator into a
//! [`SessionEngine`].

use codebreak_session::{
    CodeGenerator, EngineConfig, GeneratorConfig, MemoryStore,
    RandomCodeGenerator, SessionEngine, SessionStore,
};

use crate::CodebreakError;

/// Builder for configuring a [`SessionEngine`].
///
/// Defaults to an in-memory store and random 4-character room codes.
/// Swapping the store or generator changes the builder's type, so the
/// engine you get back is fully concrete.
///
/// # Example
///
/// ```rust
/// use codebreak::prelude::*;
///
/// let engine = EngineBuilder::new()
///     .max_id_attempts(3)
///     .generator(|| "ROOM".to_string())
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().max_id_attempts, 3);
/// ```
#[derive(Debug)]
pub struct EngineBuilder<S = MemoryStore, G = RandomCodeGenerator> {
    store: S,
    generator: G,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            generator: RandomCodeGenerator::default(),
            config: EngineConfig::default(),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, G> EngineBuilder<S, G>
where
    S: SessionStore,
    G: CodeGenerator,
{
    /// Replaces the whole engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how many ids `create_session` tries before giving up.
    pub fn max_id_attempts(mut self, attempts: u32) -> Self {
        self.config.max_id_attempts = attempts;
        self
    }

    /// Uses a different session store.
    pub fn store<S2: SessionStore>(self, store: S2) -> EngineBuilder<S2, G> {
        EngineBuilder {
            store,
            generator: self.generator,
            config: self.config,
        }
    }

    /// Uses a different room code generator.
    pub fn generator<G2: CodeGenerator>(
        self,
        generator: G2,
    ) -> EngineBuilder<S, G2> {
        EngineBuilder {
            store: self.store,
            generator,
            config: self.config,
        }
    }

    /// Uses random room codes of the given shape.
    ///
    /// # Errors
    /// Returns [`CodebreakError::Config`] if the shape can't produce codes.
    pub fn room_codes(
        self,
        config: &GeneratorConfig,
    ) -> Result<EngineBuilder<S, RandomCodeGenerator>, CodebreakError> {
        let generator = RandomCodeGenerator::new(config)?;
        Ok(self.generator(generator))
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    /// Returns [`CodebreakError::Config`] for unusable settings.
    pub fn build(self) -> Result<SessionEngine<S, G>, CodebreakError> {
        let max_id_attempts = self.config.max_id_attempts;
        let engine = SessionEngine::new(self.store, self.generator, self.config)?;

        tracing::debug!(max_id_attempts, "session engine built");
        Ok(engine)
    }
}
