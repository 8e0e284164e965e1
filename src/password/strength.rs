//! Heuristic password strength scoring.
//!
//! The score is a sum of independent checks, clamped to 0–4:
//!
//! | Check | Effect |
//! |---|---|
//! | length ≥ 8 | +1 |
//! | length ≥ 12 | +1 |
//! | ≥ 3 of lowercase / uppercase / digit / symbol | +1 |
//! | common password (exact, case-insensitive) | −1 |
//! | 3+ identical characters in a row | −1 |
//! | keyboard walk (`qwerty`, `asdf`, …) | −1 |
//! | 3+ ascending letters or digits (`abc`, `123`) | −1 |
//!
//! Entropy is `length × log2(pool)` where the pool is the sum of the sizes
//! of the character classes present. It is a presence-based upper bound,
//! not a measure of the characters actually used.

use serde::Serialize;
use std::fmt;

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "passw0rd", "123456", "1234567", "12345678", "123456789",
    "12345", "000000", "111111", "123123", "abc123", "qwerty", "qwerty123", "admin",
    "login", "letmein", "welcome", "monkey", "dragon", "master", "iloveyou", "sunshine",
    "princess", "football", "baseball", "shadow", "superman", "starwars", "trustno1",
];

const KEYBOARD_PATTERNS: &[&str] = &[
    "qwerty", "qwertz", "azerty", "asdf", "zxcv", "qazwsx", "1qaz", "2wsx", "!@#$",
];

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";

const LOWERCASE_POOL: u32 = 26;
const UPPERCASE_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
const SYMBOL_POOL: u32 = 32;

/// Guesses per second assumed by the crack-time estimate.
const GUESSES_PER_SECOND: f64 = 1e9;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Five-level strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Strength {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of [`analyze_password`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordAnalysis {
    /// 0 (very weak) to 4 (strong).
    pub score: u8,
    pub strength: Strength,
    /// One suggestion per failed check, or a single positive note.
    pub feedback: Vec<String>,
    /// Average-case time to brute force at 10⁹ guesses/second.
    pub crack_time: String,
    /// Bits.
    pub entropy: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct CharClasses {
    lowercase: bool,
    uppercase: bool,
    digit: bool,
    symbol: bool,
}

impl CharClasses {
    fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut acc, c| {
            if c.is_ascii_lowercase() {
                acc.lowercase = true;
            } else if c.is_ascii_uppercase() {
                acc.uppercase = true;
            } else if c.is_ascii_digit() {
                acc.digit = true;
            } else {
                acc.symbol = true;
            }
            acc
        })
    }

    fn count(self) -> usize {
        [self.lowercase, self.uppercase, self.digit, self.symbol]
            .iter()
            .filter(|&&present| present)
            .count()
    }

    fn pool_size(self) -> u32 {
        let mut pool = 0;
        if self.lowercase {
            pool += LOWERCASE_POOL;
        }
        if self.uppercase {
            pool += UPPERCASE_POOL;
        }
        if self.digit {
            pool += DIGIT_POOL;
        }
        if self.symbol {
            pool += SYMBOL_POOL;
        }
        pool
    }
}

/// Score a password and explain the score.
pub fn analyze_password(password: &str) -> PasswordAnalysis {
    if password.is_empty() {
        return PasswordAnalysis {
            score: 0,
            strength: Strength::VeryWeak,
            feedback: vec!["Enter a password to analyze".to_string()],
            crack_time: "Instant".to_string(),
            entropy: 0.0,
        };
    }

    let length = password.chars().count();
    let classes = CharClasses::of(password);
    let lowered = password.to_lowercase();

    let mut score: i32 = 0;
    let mut feedback = Vec::new();

    if length >= 8 {
        score += 1;
    } else {
        feedback.push("Use at least 8 characters".to_string());
    }

    if length >= 12 {
        score += 1;
    } else if length >= 8 {
        feedback.push("Use 12 or more characters for better security".to_string());
    }

    if classes.count() >= 3 {
        score += 1;
    } else {
        feedback.push("Mix uppercase, lowercase, numbers and symbols".to_string());
    }

    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        score -= 1;
        feedback.push("This is a commonly used password".to_string());
    }

    if has_repeated_run(password) {
        score -= 1;
        feedback.push("Avoid repeating the same character (e.g. \"aaa\")".to_string());
    }

    if KEYBOARD_PATTERNS.iter().any(|p| lowered.contains(p)) {
        score -= 1;
        feedback.push("Avoid keyboard patterns like \"qwerty\"".to_string());
    }

    if has_sequence(&lowered) {
        score -= 1;
        feedback.push("Avoid sequences like \"abc\" or \"123\"".to_string());
    }

    if feedback.is_empty() {
        feedback.push("Great password!".to_string());
    }

    let score = score.clamp(0, 4) as u8;
    let entropy = length as f64 * (classes.pool_size() as f64).log2();

    PasswordAnalysis {
        score,
        strength: Strength::from_score(score),
        feedback,
        crack_time: estimate_crack_time(entropy),
        entropy,
    }
}

/// Three or more identical characters in a row.
fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Three or more ascending consecutive letters or digits (`abc`, `789`).
/// Expects lowercase input.
fn has_sequence(lowered: &str) -> bool {
    let chars: Vec<char> = lowered.chars().collect();
    chars.windows(3).any(|w| {
        let triple: String = w.iter().collect();
        ALPHABET.contains(&triple) || DIGITS.contains(&triple)
    })
}

/// Average-case brute-force time for `entropy` bits: half the keyspace
/// at [`GUESSES_PER_SECOND`].
pub fn estimate_crack_time(entropy: f64) -> String {
    let seconds = 2f64.powf(entropy) / 2.0 / GUESSES_PER_SECOND;
    format_duration(seconds)
}

fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        "Less than a second".to_string()
    } else if seconds < MINUTE {
        plural(seconds, "second")
    } else if seconds < HOUR {
        plural(seconds / MINUTE, "minute")
    } else if seconds < DAY {
        plural(seconds / HOUR, "hour")
    } else if seconds < YEAR {
        plural(seconds / DAY, "day")
    } else if seconds < 1000.0 * YEAR {
        plural(seconds / YEAR, "year")
    } else {
        "Centuries".to_string()
    }
}

fn plural(value: f64, unit: &str) -> String {
    let n = value.floor() as u64;
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
