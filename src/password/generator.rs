//! Random password generation.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";
/// Characters easily confused with one another in many fonts.
const AMBIGUOUS: &str = "0O1lI";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password length must be between {MIN_LENGTH} and {MAX_LENGTH}, got {0}")]
    InvalidLength(usize),
    #[error("at least one character class must be enabled")]
    NoCharacterClasses,
}

/// What to put in a generated password.
///
/// Also the `[password]` section of `toolshub.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Leave out `0 O 1 l I`.
    pub exclude_ambiguous: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordOptions {
    pub fn validate(&self) -> Result<(), PasswordError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(PasswordError::InvalidLength(self.length));
        }
        if self.character_classes().is_empty() {
            return Err(PasswordError::NoCharacterClasses);
        }
        Ok(())
    }

    /// Enabled classes, each already filtered for ambiguity.
    fn character_classes(&self) -> Vec<Vec<char>> {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, set)| {
            set.chars()
                .filter(|c| !(self.exclude_ambiguous && AMBIGUOUS.contains(*c)))
                .collect()
        })
        .collect()
    }
}

/// Generate a password using the given RNG.
///
/// Every enabled class is represented at least once; the remaining
/// positions draw from the union of all enabled classes, and the result is
/// shuffled so the guaranteed characters are not at predictable positions.
pub fn generate_password<R: Rng>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String, PasswordError> {
    options.validate()?;
    let classes = options.character_classes();
    let pool: Vec<char> = classes.iter().flatten().copied().collect();

    let mut chars: Vec<char> = classes
        .iter()
        .map(|class| class[rng.random_range(0..class.len())])
        .collect();
    while chars.len() < options.length {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }
    chars.shuffle(rng);

    Ok(chars.into_iter().collect())
}

/// [`generate_password`] with the thread-local RNG.
pub fn generate_password_default(options: &PasswordOptions) -> Result<String, PasswordError> {
    generate_password(options, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn default_options_are_valid() {
        assert!(PasswordOptions::default().validate().is_ok());
    }

    #[test]
    fn generates_requested_length() {
        let options = PasswordOptions {
            length: 24,
            ..Default::default()
        };
        let password = generate_password(&options, &mut seeded()).unwrap();
        assert_eq!(password.chars().count(), 24);
    }

    #[test]
    fn every_enabled_class_is_present() {
        let options = PasswordOptions {
            length: MIN_LENGTH,
            ..Default::default()
        };
        let mut rng = seeded();
        for _ in 0..100 {
            let password = generate_password(&options, &mut rng).unwrap();
            assert!(password.chars().any(|c| c.is_ascii_lowercase()), "{password}");
            assert!(password.chars().any(|c| c.is_ascii_uppercase()), "{password}");
            assert!(password.chars().any(|c| c.is_ascii_digit()), "{password}");
            assert!(password.chars().any(|c| SYMBOLS.contains(c)), "{password}");
        }
    }

    #[test]
    fn disabled_classes_are_absent() {
        let options = PasswordOptions {
            length: 64,
            uppercase: false,
            symbols: false,
            ..Default::default()
        };
        let password = generate_password(&options, &mut seeded()).unwrap();
        assert!(
            password
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn exclude_ambiguous_removes_lookalikes() {
        let options = PasswordOptions {
            length: MAX_LENGTH,
            exclude_ambiguous: true,
            ..Default::default()
        };
        let mut rng = seeded();
        for _ in 0..20 {
            let password = generate_password(&options, &mut rng).unwrap();
            assert!(!password.chars().any(|c| AMBIGUOUS.contains(c)), "{password}");
        }
    }

    #[test]
    fn same_seed_same_password() {
        let options = PasswordOptions::default();
        let a = generate_password(&options, &mut seeded()).unwrap();
        let b = generate_password(&options, &mut seeded()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_length_out_of_range() {
        for length in [0, MIN_LENGTH - 1, MAX_LENGTH + 1] {
            let options = PasswordOptions {
                length,
                ..Default::default()
            };
            assert_eq!(
                generate_password(&options, &mut seeded()),
                Err(PasswordError::InvalidLength(length))
            );
        }
    }

    #[test]
    fn rejects_no_classes() {
        let options = PasswordOptions {
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
            ..Default::default()
        };
        assert_eq!(
            generate_password_default(&options),
            Err(PasswordError::NoCharacterClasses)
        );
    }

    #[test]
    fn parse_partial_options_from_toml() {
        let options: PasswordOptions = toml::from_str("length = 20\nsymbols = false").unwrap();
        assert_eq!(options.length, 20);
        assert!(!options.symbols);
        assert!(options.lowercase);
    }
}
