//! Configuration file support for dtrack-upload.
//!
//! Provides the optional YAML config file (`.trivy_plugin_dependencytrack.yaml`
//! in the home directory, or an explicit `--config` path) and merges it with
//! command-line flags and environment variables.
//!
//! Precedence is flag > environment variable > config file > built-in default.
//! clap already folds environment variables into the parsed flags, so this
//! module only has to layer the file and the defaults underneath.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::application::dto::UploadCommand;
use crate::bom_upload::domain::PollSettings;
use crate::cli::{Args, ServerArgs};
use crate::logging::{parse_log_level, LogFormat};
use crate::shared::error::UploadError;
use crate::shared::Result;

const CONFIG_FILENAME: &str = ".trivy_plugin_dependencytrack.yaml";

pub const DEFAULT_URL: &str = "http://localhost:8081";
pub const DEFAULT_AUTO_CREATE: bool = true;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    pub url: Option<String>,
    pub apikey: Option<String>,
    pub project_name: Option<String>,
    pub project_version: Option<String>,
    pub auto_create: Option<bool>,
    pub bom_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub no_color: Option<bool>,
    /// Seconds between status checks
    pub poll_interval: Option<u64>,
    /// Seconds to wait for processing
    pub timeout: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Logging options after merging flags, environment and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub no_color: bool,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads the explicit config file, or discovers one in `home`.
pub fn load_config(explicit: Option<&Path>, home: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }
    match home {
        Some(dir) => Ok(discover_config(dir)?.unwrap_or_default()),
        None => Ok(ConfigFile::default()),
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref level) = config.log_level {
        if let Err(reason) = parse_log_level(level) {
            bail!(
                "Invalid config: log-level. {}\n\n💡 Hint: Use one of trace, debug, info, warn, error.",
                reason
            );
        }
    }
    if let Some(ref format) = config.log_format {
        if let Err(reason) = LogFormat::from_str(format) {
            bail!("Invalid config: log-format. {}", reason);
        }
    }
    for (key, value) in [
        ("poll-interval", config.poll_interval),
        ("timeout", config.timeout),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be greater than zero.\n\n💡 Hint: Values are in seconds.",
                key
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Merges logging options. Values in the file were validated when it was loaded.
pub fn resolve_log_settings(args: &Args, config: &ConfigFile) -> LogSettings {
    let level = args
        .log_level
        .clone()
        .or_else(|| {
            config
                .log_level
                .as_deref()
                .and_then(|level| parse_log_level(level).ok())
        })
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let format = args
        .log_format
        .or_else(|| {
            config
                .log_format
                .as_deref()
                .and_then(|format| LogFormat::from_str(format).ok())
        })
        .unwrap_or_default();

    let no_color = args.no_color.or(config.no_color).unwrap_or(false);

    LogSettings {
        level,
        format,
        no_color,
    }
}

/// Merges the upload settings into one immutable command.
///
/// Missing required values are left empty here; the upload use case reports
/// the first one that is missing.
pub fn resolve_upload_command(
    server: &ServerArgs,
    config: &ConfigFile,
) -> std::result::Result<UploadCommand, UploadError> {
    let server_url = pick(&server.url, &config.url).unwrap_or_else(|| DEFAULT_URL.to_string());
    let api_key = pick(&server.apikey, &config.apikey).unwrap_or_default();
    let project_name = pick(&server.project_name, &config.project_name).unwrap_or_default();
    let project_version =
        pick(&server.project_version, &config.project_version).unwrap_or_default();
    let auto_create = server
        .auto_create
        .or(config.auto_create)
        .unwrap_or(DEFAULT_AUTO_CREATE);
    let bom_path = pick(&server.bom_file, &config.bom_file).unwrap_or_default();

    let poll_interval = server
        .poll_interval
        .or(config.poll_interval)
        .map(Duration::from_secs)
        .unwrap_or(PollSettings::DEFAULT_POLL_INTERVAL);
    let deadline = server
        .timeout
        .or(config.timeout)
        .map(Duration::from_secs)
        .unwrap_or(PollSettings::DEFAULT_DEADLINE);

    let poll_settings =
        PollSettings::new(poll_interval, deadline).map_err(|e| UploadError::Configuration {
            setting: if poll_interval.is_zero() {
                "poll-interval"
            } else {
                "timeout"
            },
            env_var: if poll_interval.is_zero() {
                "TRIVY_PLUGIN_DEPENDENCYTRACK_POLL_INTERVAL"
            } else {
                "TRIVY_PLUGIN_DEPENDENCYTRACK_TIMEOUT"
            },
            reason: e.to_string(),
        })?;

    Ok(UploadCommand::new(
        server_url,
        api_key,
        project_name,
        project_version,
        auto_create,
        bom_path,
        poll_settings,
    ))
}

/// First value that is set, treating an empty string from the command line
/// or environment as unset.
fn pick<T>(flag: &Option<T>, file: &Option<T>) -> Option<T>
where
    T: Clone + AsRef<std::ffi::OsStr>,
{
    flag.iter()
        .chain(file.iter())
        .find(|value| !value.as_ref().is_empty())
        .cloned()
}
