//! Engine and generator configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`SessionEngine`](crate::SessionEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How many ids `create_session` draws from the generator before
    /// giving up with `GenerationExhausted`. Collisions are rare with a
    /// decent generator; this only guards against a broken one.
    pub max_id_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_id_attempts: 10 }
    }
}

impl EngineConfig {
    /// # Errors
    /// [`ConfigError::ZeroAttempts`] if `create_session` could never
    /// succeed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_id_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Shape of the room codes produced by
/// [`RandomCodeGenerator`](crate::RandomCodeGenerator).
///
/// The default (4 characters over `A–Z0–9`) gives about 1.7 million
/// codes: short enough to read out loud, large enough that collisions
/// are rare for a single server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Characters per room code.
    pub length: usize,

    /// Characters to draw from. Should be printable and free of
    /// whitespace, since players type these codes in.
    pub alphabet: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 4,
            alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Checks the config can produce usable room codes.
    ///
    /// # Errors
    /// - [`ConfigError::ZeroLength`]: `length` is 0
    /// - [`ConfigError::EmptyAlphabet`]: nothing to draw from
    /// - [`ConfigError::UnprintableAlphabet`]: whitespace or control
    ///   characters, which players couldn't type back
    /// - [`ConfigError::LowercaseAlphabet`]: typed room codes are
    ///   uppercased before lookup, so lowercase ids could never be joined
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if let Some(c) = self
            .alphabet
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ConfigError::UnprintableAlphabet(c));
        }
        if let Some(c) = self.alphabet.chars().find(|c| c.is_lowercase()) {
            return Err(ConfigError::LowercaseAlphabet(c));
        }
        Ok(())
    }
}

/// A configuration value that can't work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_id_attempts must be at least 1")]
    ZeroAttempts,

    #[error("room code length must be at least 1")]
    ZeroLength,

    #[error("room code alphabet is empty")]
    EmptyAlphabet,

    #[error("room code alphabet contains unprintable character {0:?}")]
    UnprintableAlphabet(char),

    #[error("room code alphabet contains lowercase character {0:?}")]
    LowercaseAlphabet(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        assert_eq!(EngineConfig::default().max_id_attempts, 10);
    }

    #[test]
    fn test_engine_config_rejects_zero_attempts() {
        let config = EngineConfig { max_id_attempts: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAttempts));
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_generator_config_default_is_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.length, 4);
        assert_eq!(config.alphabet.len(), 36);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_generator_config_rejects_zero_length() {
        let config = GeneratorConfig { length: 0, ..GeneratorConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLength));
    }

    #[test]
    fn test_generator_config_rejects_empty_alphabet() {
        let config = GeneratorConfig { alphabet: String::new(), ..GeneratorConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyAlphabet));
    }

    #[test]
    fn test_generator_config_rejects_space() {
        let config = GeneratorConfig { alphabet: "AB C".into(), ..GeneratorConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::UnprintableAlphabet(' ')));
    }

    #[test]
    fn test_generator_config_rejects_lowercase() {
        let config = GeneratorConfig { alphabet: "ABcD".into(), ..GeneratorConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::LowercaseAlphabet('c')));
    }

    #[test]
    fn test_generator_config_accepts_digits_only() {
        let config = GeneratorConfig { alphabet: "0123456789".into(), ..GeneratorConfig::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_engine_config_deserializes_from_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "max_id_attempts": 3 }"#).unwrap();
        assert_eq!(config.max_id_attempts, 3);
    }
}
