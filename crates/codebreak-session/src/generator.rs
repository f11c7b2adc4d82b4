//! Room code generation.
//!
//! The engine doesn't care how room codes are made, only that a fresh
//! one is *probably* unused. It asks a [`CodeGenerator`] for a string and
//! retries on collision, so even a weak generator is safe, only slower.

use rand::Rng;

use crate::{ConfigError, GeneratorConfig};

/// Produces candidate room codes.
///
/// Any `Fn() -> String` closure is a generator too, which keeps tests
/// short:
///
/// ```rust
/// use codebreak_session::CodeGenerator;
///
/// let fixed = || "ROOM".to_string();
/// assert_eq!(fixed.generate(), "ROOM");
/// ```
pub trait CodeGenerator: Send + Sync + 'static {
    /// Returns a short printable string. Need not be unique.
    fn generate(&self) -> String;
}

impl<F> CodeGenerator for F
where
    F: Fn() -> String + Send + Sync + 'static,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Draws each character uniformly at random from the configured alphabet.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator for the given room code shape.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the config can't produce codes.
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            alphabet: config.alphabet.chars().collect(),
            length: config.length,
        })
    }
}

impl Default for RandomCodeGenerator {
    /// 4 characters over `A–Z0–9`.
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            alphabet: config.alphabet.chars().collect(),
            length: config.length,
        }
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_shape() {
        let generator = RandomCodeGenerator::default();
        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.len(), 4);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_respects_custom_alphabet_and_length() {
        let config = GeneratorConfig { length: 6, alphabet: "XY".into() };
        let generator = RandomCodeGenerator::new(&config).unwrap();

        let code = generator.generate();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c == 'X' || c == 'Y'));
    }

    #[test]
    fn test_generate_single_letter_alphabet_is_constant() {
        let config = GeneratorConfig { length: 3, alphabet: "Q".into() };
        let generator = RandomCodeGenerator::new(&config).unwrap();
        assert_eq!(generator.generate(), "QQQ");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GeneratorConfig { length: 0, ..GeneratorConfig::default() };
        assert!(matches!(
            RandomCodeGenerator::new(&config),
            Err(ConfigError::ZeroLength)
        ));
    }

    #[test]
    fn test_generate_produces_varied_codes() {
        // 36^4 possibilities; 50 draws colliding into one value would
        // mean the RNG isn't being used at all.
        let generator = RandomCodeGenerator::default();
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generator.generate()).collect();
        assert!(codes.len() > 1);
    }
}
