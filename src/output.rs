//! # Output Module
//!
//! This module centralizes all user-facing output for noticectl.
//!
//! ## Design Goals
//!
//! - **One line**: a run ends with a single success or failure line
//! - **Progressive**: failed files are listed only with `-v`
//! - **Scriptable**: `-q` silences the success line; failures are always reported
//!
//! Diagnostics belong to `tracing` (see [`crate::logging`]), not here.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::RunReport;

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the summary line for a finished run.
///
/// `log_path` is the run log written with `--info`, if any.
pub fn print_outcome(report: &RunReport, log_path: Option<&Path>) {
  if report.has_error() {
    print_failure(report, log_path);
  } else {
    print_success(report);
  }
}

fn print_success(report: &RunReport) {
  if is_quiet() {
    return;
  }

  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    success_message(report)
  );
}

fn print_failure(report: &RunReport, log_path: Option<&Path>) {
  println!(
    "{} {}",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    failure_message(report, log_path)
  );

  if is_verbose() {
    print_failed_files(report);
  }
}

/// Print every failed path with its error, relative to the run root.
fn print_failed_files(report: &RunReport) {
  for (path, err) in report.failures() {
    let display_path = make_relative_path(path, Some(report.root.as_path()));
    println!(
      "  {} {}",
      display_path,
      format!("({err})").if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

fn success_message(report: &RunReport) -> String {
  let mut message = String::from("Operation completed successfully.");
  if is_verbose() {
    message.push_str(&format!(
      " {} changed, {} unchanged ({:.2}s)",
      report.changed_count(),
      report.unchanged_count(),
      report.elapsed.as_secs_f64()
    ));
  }
  message
}

fn failure_message(report: &RunReport, log_path: Option<&Path>) -> String {
  let failed = report.failure_count();
  let total = report.files.len();
  let unreadable = report.dir_failures.len();

  let mut parts = Vec::new();
  if failed > 0 || unreadable == 0 {
    parts.push(format!("{} of {} {}", failed, total, if total == 1 { "file" } else { "files" }));
  }
  if unreadable > 0 {
    parts.push(format!(
      "{} unreadable {}",
      unreadable,
      if unreadable == 1 { "directory" } else { "directories" }
    ));
  }
  let mut message = format!("Operation failed for {}.", parts.join(" and "));

  match log_path {
    Some(path) => message.push_str(&format!(" See {} for details.", path.display())),
    None => message.push_str(" Re-run with --info to write a detailed log."),
  }
  message
}

/// Make a path relative to the run root (or else the current directory) for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(relative) = root.and_then(|root| path.strip_prefix(root).ok()) {
    return relative.to_string_lossy().to_string();
  }

  std::env::current_dir()
    .ok()
    .and_then(|cwd| pathdiff::diff_paths(path, cwd))
    .filter(|relative| !relative.as_os_str().is_empty())
    .unwrap_or_else(|| path.to_path_buf())
    .to_string_lossy()
    .to_string()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::error::{FileError, TransformError};
  use crate::operation::Operation;
  use crate::report::FileOutcome;

  fn report_with_failure() -> RunReport {
    let mut report = RunReport::new(Operation::InsertBefore, PathBuf::from("/project"));
    report.record(PathBuf::from("/project/a.java"), FileOutcome::Success { changed: true });
    report.record(
      PathBuf::from("/project/b.java"),
      FileOutcome::Failed(FileError::from(TransformError::AlreadyPresent)),
    );
    report
  }

  #[test]
  fn test_failure_message_names_log_path() {
    let message = failure_message(&report_with_failure(), Some(Path::new("/project/noticectl.log")));
    assert!(message.starts_with("Operation failed for 1 of 2 files."));
    assert!(message.contains("/project/noticectl.log"));
  }

  #[test]
  fn test_failure_message_suggests_info() {
    let message = failure_message(&report_with_failure(), None);
    assert!(message.contains("--info"));
  }

  #[test]
  fn test_failure_message_counts_directories_apart() {
    let mut report = RunReport::new(Operation::InsertBefore, PathBuf::from("/project"));
    report.record(PathBuf::from("/project/a.java"), FileOutcome::Success { changed: true });
    report.record_dir_failure(
      PathBuf::from("/project/locked"),
      FileError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
    );
    assert!(failure_message(&report, None).starts_with("Operation failed for 1 unreadable directory."));

    report.record(
      PathBuf::from("/project/b.java"),
      FileOutcome::Failed(FileError::from(TransformError::AlreadyPresent)),
    );
    assert!(failure_message(&report, None).starts_with("Operation failed for 1 of 2 files and 1 unreadable directory."));
  }

  #[test]
  fn test_success_message() {
    let report = RunReport::new(Operation::Remove, PathBuf::from("/project"));
    assert!(success_message(&report).starts_with("Operation completed successfully."));
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/Main.java");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(root.as_path())), "src/Main.java");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let cwd = std::env::current_dir().unwrap();
    let path = cwd.join("src").join("Main.java");

    let result = make_relative_path(&path, Some(Path::new("/elsewhere")));
    assert_eq!(PathBuf::from(result), PathBuf::from("src").join("Main.java"));
  }
}
