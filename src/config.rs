//! Tool configuration module.
//!
//! Handles loading, validating, and merging `toolshub.toml`. Stock defaults
//! are the base layer; a user file in the config directory (the current
//! directory unless `--config` says otherwise) overrides them key by key.
//! Command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [password]
//! length = 16               # 4-128
//! lowercase = true
//! uppercase = true
//! digits = true
//! symbols = true
//! exclude_ambiguous = false # Leave out 0 O 1 l I
//!
//! [gradient]
//! angle = 90.0              # Degrees, linear gradients only
//! kind = "linear"           # "linear" or "radial"
//!
//! [images]
//! quality = 90              # JPEG encoding quality (1-100)
//! favicon_sizes = [16, 32, 48, 180, 192, 512]
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [password]
//! length = 24
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::gradient::GradientKind;
use crate::imaging::FAVICON_SIZES;
use crate::password::PasswordOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "toolshub.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `toolshub.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Defaults for `password generate`.
    pub password: PasswordOptions,
    /// Defaults for `gradient`.
    pub gradient: GradientConfig,
    /// Encoding quality and favicon sizes.
    pub images: ImagesConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ToolsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.password
            .validate()
            .map_err(|e| ConfigError::Validation(format!("password: {e}")))?;
        if !self.gradient.angle.is_finite() {
            return Err(ConfigError::Validation(
                "gradient.angle must be a finite number".into(),
            ));
        }
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.favicon_sizes.is_empty() {
            return Err(ConfigError::Validation(
                "images.favicon_sizes must not be empty".into(),
            ));
        }
        if self.images.favicon_sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "images.favicon_sizes values must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Gradient defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradientConfig {
    /// Angle in degrees. Ignored for radial gradients.
    pub angle: f64,
    pub kind: GradientKind,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            angle: 90.0,
            kind: GradientKind::Linear,
        }
    }
}

/// Image encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Edge sizes written by `favicon`.
    pub favicon_sizes: Vec<u32>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            favicon_sizes: FAVICON_SIZES.to_vec(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolsConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `toolshub.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `toolshub.toml`.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
        return Ok(None);
    }
    log::debug!("loading config from {}", config_path.display());
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `toolshub.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<ToolsConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `toolshub.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# ToolsHub Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# toolshub looks for this file in the current directory, or in the
# directory given with --config. Command-line flags win over these values.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Password generator
# ---------------------------------------------------------------------------
[password]
# Number of characters, 4-128.
length = 16

# Character classes to draw from. At least one must be enabled; every
# enabled class appears at least once in each password.
lowercase = true
uppercase = true
digits = true
symbols = true

# Leave out characters that look alike in many fonts: 0 O 1 l I
exclude_ambiguous = false

# ---------------------------------------------------------------------------
# Gradient builder
# ---------------------------------------------------------------------------
[gradient]
# Direction in degrees for linear gradients (90 = left to right).
angle = 90.0

# "linear" or "radial". Radial gradients are circles and ignore the angle.
kind = "linear"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# JPEG encoding quality (1 = worst, 100 = best). PNG and WebP are lossless.
quality = 90

# Square PNG sizes written by `toolshub favicon`. A 32px favicon.ico is
# always written as well.
favicon_sizes = [16, 32, 48, 180, 192, 512]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers for `toolshub batch`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn default_config_values() {
        let config = ToolsConfig::default();
        assert_eq!(config.password.length, 16);
        assert!(config.password.symbols);
        assert_eq!(config.gradient.angle, 90.0);
        assert_eq!(config.gradient.kind, GradientKind::Linear);
        assert_eq!(config.images.quality, 90);
        assert_eq!(config.images.favicon_sizes, vec![16, 32, 48, 180, 192, 512]);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[password]
length = 24
"#;
        let config: ToolsConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.password.length, 24);
        // Default values preserved
        assert!(config.password.lowercase);
        assert_eq!(config.images.quality, 90);
    }

    #[test]
    fn parse_gradient_settings() {
        let toml = r#"
[gradient]
angle = 45
kind = "radial"
"#;
        let config: ToolsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gradient.angle, 45.0);
        assert_eq!(config.gradient.kind, GradientKind::Radial);
    }

    #[test]
    fn parse_unknown_gradient_kind_is_error() {
        let toml = r#"
[gradient]
kind = "conic"
"#;
        assert!(toml::from_str::<ToolsConfig>(toml).is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.password.length, 16);
        assert_eq!(config.images.quality, 90);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            r#"
[password]
length = 32
symbols = false

[images]
favicon_sizes = [32, 64]
"#,
        );

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.password.length, 32);
        assert!(!config.password.symbols);
        assert_eq!(config.images.favicon_sizes, vec![32, 64]);
        // Unspecified values should be defaults
        assert!(config.password.digits);
        assert_eq!(config.images.quality, 90);
        assert_eq!(config.gradient.kind, GradientKind::Linear);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "this is not valid toml [[[");

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn default_processing_config() {
        let config = ProcessingConfig::default();
        assert_eq!(config.max_processes, None);
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn parse_processing_config() {
        let toml = r#"
[processing]
max_processes = 4
"#;
        let config: ToolsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.processing.max_processes, Some(4));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"quality = 90"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"quality = 70"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("quality").unwrap().as_integer(), Some(70));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[password]
length = 16
symbols = true
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[password]
length = 20
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let password = merged.get("password").unwrap();
        assert_eq!(password.get("length").unwrap().as_integer(), Some(20));
        assert_eq!(password.get("symbols").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("sizes = [16, 32, 48]").unwrap();
        let overlay: toml::Value = toml::from_str("sizes = [64]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("sizes").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn merge_toml_adds_new_keys() {
        let base: toml::Value = toml::from_str("[processing]").unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[processing]
max_processes = 2
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged
                .get("processing")
                .unwrap()
                .get("max_processes")
                .unwrap()
                .as_integer(),
            Some(2)
        );
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[images]
qualty = 90
"#;
        let result: Result<ToolsConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[colors]
quality = 90
"#;
        let result: Result<ToolsConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            r#"
[password]
lenght = 20
"#,
        );
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(ToolsConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = ToolsConfig::default();
        config.images.quality = 100;
        assert!(config.validate().is_ok());
        config.images.quality = 1;
        assert!(config.validate().is_ok());

        config.images.quality = 0;
        assert!(config.validate().is_err());
        config.images.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn validate_password_length() {
        let mut config = ToolsConfig::default();
        config.password.length = 3;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("password"));

        config.password.length = 129;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_password_needs_a_class() {
        let mut config = ToolsConfig::default();
        config.password.lowercase = false;
        config.password.uppercase = false;
        config.password.digits = false;
        config.password.symbols = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_favicon_sizes() {
        let mut config = ToolsConfig::default();
        config.images.favicon_sizes = vec![];
        assert!(config.validate().is_err());

        config.images.favicon_sizes = vec![16, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_gradient_angle_finite() {
        let mut config = ToolsConfig::default();
        config.gradient.angle = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            r#"
[images]
quality = 200
"#,
        );

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(tmp.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_raw_config_returns_value_when_file_exists() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            r#"
[images]
quality = 85
"#,
        );

        let val = load_raw_config(tmp.path()).unwrap().unwrap();
        assert_eq!(
            val.get("images")
                .unwrap()
                .get("quality")
                .unwrap()
                .as_integer(),
            Some(85)
        );
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.images.quality, 90);
        assert_eq!(config.password.length, 16);
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[images]
quality = 70
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.images.quality, 70);
        // Other fields preserved from defaults
        assert_eq!(config.images.favicon_sizes, FAVICON_SIZES.to_vec());
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str(
            r#"
[password]
length = 1000
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ToolsConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = ToolsConfig::default();
        assert_eq!(config.password, defaults.password);
        assert_eq!(config.gradient.angle, defaults.gradient.angle);
        assert_eq!(config.gradient.kind, defaults.gradient.kind);
        assert_eq!(config.images.quality, defaults.images.quality);
        assert_eq!(config.images.favicon_sizes, defaults.images.favicon_sizes);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[password]"));
        assert!(content.contains("[gradient]"));
        assert!(content.contains("[images]"));
        assert!(content.contains("[processing]"));
    }

    // =========================================================================
    // stock_defaults_value tests
    // =========================================================================

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("password").is_some());
        assert!(val.get("gradient").is_some());
        assert!(val.get("images").is_some());
        assert!(val.get("processing").is_some());
    }
}
