//! # Error Module
//!
//! Error types for the three layers of a run:
//!
//! - [`TransformError`] - a notice transformation refused to produce new text
//! - [`FileError`] - a single file could not be processed; recorded in the
//!   [`RunReport`](crate::report::RunReport) and never aborts the walk
//! - [`RunError`] - the run itself could not start or complete; mapped to a
//!   process exit code by [`RunError::exit_code`]

use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::exit_codes;

/// Failure of a pure notice transformation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
  /// The file already starts with the notice being inserted.
  #[error("the notice is already present at the top of the file")]
  AlreadyPresent,
}

/// Failure while processing one file of the tree.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
  #[error(transparent)]
  Transform(#[from] TransformError),

  #[error("permission denied: {0}")]
  PermissionDenied(#[source] io::Error),

  #[error("file is not valid UTF-8 text")]
  InvalidUtf8(#[source] io::Error),

  #[error("I/O error: {0}")]
  Io(#[source] io::Error),
}

impl From<io::Error> for FileError {
  fn from(err: io::Error) -> Self {
    match err.kind() {
      io::ErrorKind::PermissionDenied => Self::PermissionDenied(err),
      io::ErrorKind::InvalidData => Self::InvalidUtf8(err),
      _ => Self::Io(err),
    }
  }
}

impl FileError {
  /// Short machine-friendly label used in reports.
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Transform(TransformError::AlreadyPresent) => "already-present",
      Self::PermissionDenied(_) => "permission-denied",
      Self::InvalidUtf8(_) => "invalid-utf8",
      Self::Io(_) => "io",
    }
  }
}

/// Failure that stops a run before or outside the per-file walk.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  /// Malformed or missing arguments.
  #[error("{0}")]
  Argument(String),

  /// The command name did not resolve to an operation.
  #[error("unknown command '{0}' (expected one of: insert, remove, replace)")]
  UnknownCommand(String),

  #[error("failed to read notice from {path}: {source}")]
  NoticeRead { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("root directory {path} is not a readable directory: {source}")]
  Root { path: PathBuf, source: io::Error },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy { from: PathBuf, to: PathBuf, source: io::Error },

  #[error("failed to open log file {path}: {source}")]
  LogFile { path: PathBuf, source: io::Error },

  #[error("failed to write report {path}: {message}")]
  Report { path: PathBuf, message: String },
}

impl RunError {
  /// Convenience constructor for argument errors.
  pub fn argument(message: impl Into<String>) -> Self {
    Self::Argument(message.into())
  }

  /// The process exit code this error maps to.
  pub const fn exit_code(&self) -> i32 {
    match self {
      Self::Argument(_) | Self::NoticeRead { .. } | Self::Config(_) | Self::Root { .. } => exit_codes::USAGE,
      Self::UnknownCommand(_) => exit_codes::UNKNOWN_COMMAND,
      Self::Copy { .. } | Self::LogFile { .. } | Self::Report { .. } => exit_codes::FAILURE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_io_errors_are_classified_by_kind() {
    let denied = FileError::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
    assert!(matches!(denied, FileError::PermissionDenied(_)));
    assert_eq!(denied.kind(), "permission-denied");

    let binary = FileError::from(io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"));
    assert!(matches!(binary, FileError::InvalidUtf8(_)));

    let missing = FileError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
    assert!(matches!(missing, FileError::Io(_)));
    assert_eq!(missing.kind(), "io");
  }

  #[test]
  fn test_run_error_exit_codes() {
    assert_eq!(RunError::argument("missing --notice").exit_code(), exit_codes::USAGE);
    assert_eq!(
      RunError::UnknownCommand("frobnicate".to_string()).exit_code(),
      exit_codes::UNKNOWN_COMMAND
    );
    let copy = RunError::Copy {
      from: PathBuf::from("a"),
      to: PathBuf::from("b"),
      source: io::Error::other("disk full"),
    };
    assert_eq!(copy.exit_code(), exit_codes::FAILURE);
  }

  #[test]
  fn test_already_present_message() {
    let err = FileError::from(TransformError::AlreadyPresent);
    assert_eq!(err.kind(), "already-present");
    assert!(err.to_string().contains("already present"));
  }
}
