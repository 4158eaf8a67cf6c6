//! # File Filter Module
//!
//! This module contains components for deciding which files the processor
//! transforms. The only criterion is the file name's extension.

use std::path::Path;

use tracing::trace;

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Filter that keeps files whose name ends with one of a set of extensions.
///
/// Matching is a plain, case-sensitive suffix comparison on the file name.
/// No dot is added: `"cpp"` also matches `notcpp`, while `".cpp"` only
/// matches real `.cpp` files.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
  extensions: Vec<String>,
}

impl ExtensionFilter {
  /// Creates a new ExtensionFilter from an ordered list of suffixes.
  ///
  /// Empty entries are dropped since they would match every file.
  pub fn new(extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
    let extensions = extensions
      .into_iter()
      .map(Into::into)
      .filter(|ext: &String| !ext.is_empty())
      .collect();
    Self { extensions }
  }

  /// Returns true iff `file_name` ends with one of the configured extensions.
  pub fn matches(&self, file_name: &str) -> bool {
    self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
  }

  pub fn extensions(&self) -> &[String] {
    &self.extensions
  }

  pub fn is_empty(&self) -> bool {
    self.extensions.is_empty()
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let Some(file_name) = path.file_name() else {
      return FilterResult::skip("No file name");
    };

    if self.matches(&file_name.to_string_lossy()) {
      FilterResult::process()
    } else {
      trace!("Skipping: {} (extension not selected)", path.display());
      FilterResult::skip("Extension not selected")
    }
  }
}
