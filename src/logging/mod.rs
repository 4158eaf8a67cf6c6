//! # Logging Module
//!
//! Diagnostics are emitted with `tracing` macros everywhere in the crate. This
//! module decides where they go for the duration of one run:
//!
//! - stderr, filtered by `RUST_LOG` or else by `-v`/`-q`
//! - with `--info`, a plain-text log file receiving every event at DEBUG and above
//!
//! The subscriber is installed as the thread's default by [`RunLogging`] and
//! released when it is dropped, so nothing stays configured after a run.
//!
//! User-facing summary lines are printed by [`crate::output`], which reads the
//! [`OutputMode`] kept here.
//!
//! ## Example
//!
//! ```rust
//! use noticectl::logging::{ColorMode, RunLogging};
//!
//! ColorMode::Never.apply();
//! let logging = RunLogging::install(1, false, None).unwrap();
//! tracing::info!("visible on stderr with -v");
//! drop(logging);
//! ```

mod modes;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub use modes::{ColorMode, OutputMode, is_quiet, is_verbose, output_mode};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::error::RunError;

/// Tracing configuration active for one run.
pub struct RunLogging {
  _guard: DefaultGuard,
  log_path: Option<PathBuf>,
}

impl RunLogging {
  /// Installs the run's subscriber as the current thread's default.
  ///
  /// `log_file` is created (or truncated) before anything is logged.
  ///
  /// # Errors
  ///
  /// Returns [`RunError::LogFile`] if the log file cannot be created.
  pub fn install(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<Self, RunError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbosity, quiet)));
    let stderr_layer = fmt::layer()
      .with_writer(std::io::stderr)
      .with_target(false)
      .compact()
      .with_filter(filter);

    let file_layer = match log_file {
      Some(path) => {
        let file = File::create(path).map_err(|source| RunError::LogFile {
          path: path.to_path_buf(),
          source,
        })?;
        Some(
          fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_filter(LevelFilter::DEBUG),
        )
      }
      None => None,
    };

    let subscriber = tracing_subscriber::registry().with(stderr_layer).with(file_layer);
    let guard = tracing::subscriber::set_default(subscriber);

    if let Some(path) = log_file {
      tracing::debug!("Writing run log to {}", path.display());
    }

    Ok(Self {
      _guard: guard,
      log_path: log_file.map(Path::to_path_buf),
    })
  }

  /// Path of the log file, when `--info` is active.
  pub fn log_path(&self) -> Option<&Path> {
    self.log_path.as_deref()
  }
}

/// Stderr level used when `RUST_LOG` is not set.
const fn default_level(verbosity: u8, quiet: bool) -> &'static str {
  if quiet {
    return "error";
  }
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_level() {
    assert_eq!(default_level(0, false), "warn");
    assert_eq!(default_level(1, false), "info");
    assert_eq!(default_level(2, false), "debug");
    assert_eq!(default_level(7, false), "trace");
    assert_eq!(default_level(3, true), "error");
  }

  #[test]
  fn test_log_file_receives_events_until_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noticectl.log");

    let logging = RunLogging::install(0, true, Some(path.as_path())).unwrap();
    assert_eq!(logging.log_path(), Some(path.as_path()));
    tracing::debug!("inside the run");
    drop(logging);
    tracing::debug!("after the run");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("inside the run"));
    assert!(!content.contains("after the run"));
  }

  #[test]
  fn test_unwritable_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("noticectl.log");
    let result = RunLogging::install(0, false, Some(path.as_path()));
    assert!(matches!(result, Err(RunError::LogFile { .. })));
  }
}
