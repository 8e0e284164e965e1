//! Password tools: strength analysis and generation.
//!
//! [`analyze_password`] is deterministic and has no dependencies beyond the
//! input string. [`generate_password`] takes the RNG as a parameter so tests
//! can seed it; the CLI uses the thread-local RNG.

mod generator;
mod strength;

pub use generator::{
    MAX_LENGTH, MIN_LENGTH, PasswordError, PasswordOptions, generate_password,
    generate_password_default,
};
pub use strength::{PasswordAnalysis, Strength, analyze_password, estimate_crack_time};
