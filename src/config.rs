//! # Configuration Module
//!
//! This module provides optional file-based defaults for noticectl: the
//! extension set, the blank-line flag and the name of the `--info` log file.
//! Command-line values always take precedence over the file.
//!
//! Configuration can be specified in a `.noticectl.toml` file or via the
//! `NOTICECTL_CONFIG` environment variable.
//!
//! ```toml
//! extensions = [".java", ".cpp"]
//! blank = true
//! log-file = "notice-run.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".noticectl.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "NOTICECTL_CONFIG";

/// Name of the `--info` log file when the config does not set one.
pub const DEFAULT_LOG_FILENAME: &str = "noticectl.log";

/// Main configuration struct for noticectl.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Extensions used when `--extension` is not given, e.g. `[".java"]`.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// Default for `--blank`. The flag can only turn it on.
  #[serde(default)]
  pub blank: Option<bool>,

  /// File name of the run log written into the root directory with `--info`.
  #[serde(default)]
  pub log_file: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is well-formed TOML but not acceptable.
  #[error("Invalid value for '{key}': {message}")]
  Invalid { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    debug!("Loaded config with {} extensions", config.extensions.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - No extension entry is empty
  /// - `log-file` is a bare file name, not a path
  fn validate(&self) -> Result<(), ConfigError> {
    if self.extensions.iter().any(|ext| ext.trim().is_empty()) {
      return Err(ConfigError::Invalid {
        key: "extensions",
        message: "entries cannot be empty".to_string(),
      });
    }

    if let Some(name) = &self.log_file {
      let is_bare = Path::new(name).file_name().is_some_and(|file_name| file_name == name.as_str());
      if !is_bare {
        return Err(ConfigError::Invalid {
          key: "log-file",
          message: format!("'{}' must be a file name without directories", name),
        });
      }
    }

    Ok(())
  }

  /// The `--info` log file name, falling back to [`DEFAULT_LOG_FILENAME`].
  pub fn log_file_name(&self) -> &str {
    self.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILENAME)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `NOTICECTL_CONFIG` environment variable
/// 3. `.noticectl.toml` in `search_dir`
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem instead of silently running without it.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    debug!("Using local config: {}", local_config.display());
    return Some(local_config);
  }

  debug!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when discovery is disabled or finds nothing.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    debug!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  discover_config_path(explicit_path, search_dir)
    .map(|path| Config::load(&path))
    .transpose()
}
