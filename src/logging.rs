//! Logging initialization for dtrack-upload.
//!
//! Configures `tracing-subscriber` from the `--log-level`, `--log-format`
//! and `--no-color` options. All log output goes to stderr so stdout stays
//! free for the upload summary.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::shared::Result;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Console,
    /// Human-readable lines with target, source location and thread
    Dev,
    /// One JSON object per event
    Json,
    /// No log output at all
    None,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(LogFormat::Console),
            "dev" => Ok(LogFormat::Dev),
            "json" => Ok(LogFormat::Json),
            "none" => Ok(LogFormat::None),
            _ => Err(format!(
                "Invalid log format: {}. Please specify one of: console, json, dev, none",
                s
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Console => "console",
            LogFormat::Dev => "dev",
            LogFormat::Json => "json",
            LogFormat::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// Accepted values for `--log-level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Checks a log level name, returning it lower-cased
pub fn parse_log_level(level: &str) -> std::result::Result<String, String> {
    let normalized = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(format!(
            "Invalid log level: {}. Please specify one of: {}",
            level,
            LOG_LEVELS.join(", ")
        ))
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides `level` when set. Calling this more than once
/// returns an error instead of panicking.
pub fn init_tracing(level: &str, format: LogFormat, no_color: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    match format {
        LogFormat::Console => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(!no_color)
                        .with_target(false),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize console tracing subscriber: {}", e)
                })?;
        }
        LogFormat::Dev => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(!no_color)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize dev tracing subscriber: {}", e)
                })?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        LogFormat::None => {}
    }

    Ok(())
}
