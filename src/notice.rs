//! # Notice Module
//!
//! The [`Notice`] is the copyright block being inserted, removed or replaced.
//! It is treated as an opaque string: no comment syntax is inferred.

use std::fmt;
use std::path::Path;

use crate::error::RunError;
use crate::processor::{FileAccess, LINE_SEPARATOR};

/// Where a blank-line separator is attached to a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLine {
  /// Separator goes after the notice (notice inserted at the top of a file).
  After,
  /// Separator goes before the notice (notice appended at the bottom).
  Before,
}

/// Immutable notice text, loaded once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
  /// Builds a notice from literal text, kept exactly as given.
  ///
  /// Returns an argument error for empty or whitespace-only text.
  pub fn literal(text: &str) -> Result<Self, RunError> {
    if text.trim().is_empty() {
      return Err(RunError::argument("the notice text is empty"));
    }
    Ok(Self(text.to_string()))
  }

  /// Loads a notice from a file through the given [`FileAccess`].
  ///
  /// Surrounding whitespace, including the trailing newline most editors
  /// add, is trimmed.
  pub fn load(path: &Path, file_access: &dyn FileAccess) -> Result<Self, RunError> {
    let text = file_access.read_text(path).map_err(|source| RunError::NoticeRead {
      path: path.to_path_buf(),
      source,
    })?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
      return Err(RunError::argument(format!("notice file {} is empty", path.display())));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// Returns a copy of this notice with a blank-line separator attached.
  #[must_use]
  pub fn with_blank_line(&self, position: BlankLine) -> Self {
    match position {
      BlankLine::After => Self(format!("{}{}", self.0, LINE_SEPARATOR)),
      BlankLine::Before => Self(format!("{}{}", LINE_SEPARATOR, self.0)),
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
