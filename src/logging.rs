//! Logger initialization.
//!
//! Library code only talks to the `log` facade. The binary installs
//! `env_logger` once, early in `main`. Diagnostics go to stderr so they
//! never mix with tool output on stdout.

use log::LevelFilter;
use std::sync::Once;

/// Logger configuration.
///
/// `RUST_LOG` (env_logger filter syntax, e.g. `toolshub=debug`) wins when
/// set; otherwise `default_level` applies to everything.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// `--verbose` lowers the default to `debug`.
    pub fn from_verbosity(verbose: bool) -> Self {
        Self {
            default_level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => {
                builder.parse_filters(&filter);
            }
            _ => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);
        builder.format_timestamp(None);

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
