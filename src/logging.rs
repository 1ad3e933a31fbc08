//! Logging setup on `tracing` and `tracing-subscriber`.
//!
//! The engine only emits events. Hosts that want them on stderr call
//! `init_logging` once at startup.
//!
//! # Log Levels
//!
//! - `warn`: Ignored commands and failed loads
//! - `info`: Loads, exports, quiz starts
//! - `debug`: Mode changes, serialization sizes

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// Single-line output.
    #[default]
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for the global subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Include the module path of each event.
    pub with_target: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Level from a `-v` count: 0 is warn, 1 info, 2 debug, more is trace.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set.
    #[must_use]
    pub fn directive(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!("warn,kanji_deck={level}")
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level.
///
/// # Errors
///
/// Returns `Error::Logging` if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(config.with_target))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))
}
