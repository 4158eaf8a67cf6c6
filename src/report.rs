//! # Report Module
//!
//! This module holds the per-file outcomes of a run and can write them to
//! disk as JSON or CSV.
//!
//! Every file the processor transforms (or tries to) yields exactly one
//! [`FileReport`]; files skipped by the extension filter yield none.
//! Subdirectories that cannot be listed are kept apart in
//! [`RunReport::dir_failures`] so that `files` only ever holds files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::error::FileError;
use crate::operation::Operation;

/// Outcome of processing one file.
#[derive(Debug)]
pub enum FileOutcome {
  /// The file was processed. `changed` is false when the transform produced
  /// identical text and nothing was written.
  Success { changed: bool },
  /// The file could not be processed.
  Failed(FileError),
}

impl FileOutcome {
  pub const fn is_failure(&self) -> bool {
    matches!(self, Self::Failed(_))
  }
}

/// A processed path and its outcome.
#[derive(Debug)]
pub struct FileReport {
  pub path: PathBuf,
  pub outcome: FileOutcome,
}

/// Aggregated outcome of a full tree walk.
#[derive(Debug)]
pub struct RunReport {
  /// Operation applied during the run
  pub operation: Operation,
  /// Root the walk started from
  pub root: PathBuf,
  /// One entry per processed file, in visiting order
  pub files: Vec<FileReport>,
  /// Subdirectories that could not be listed; their contents were not visited
  pub dir_failures: Vec<FileReport>,
  /// Wall time of the walk
  pub elapsed: Duration,
}

impl RunReport {
  pub fn new(operation: Operation, root: PathBuf) -> Self {
    Self {
      operation,
      root,
      files: Vec::new(),
      dir_failures: Vec::new(),
      elapsed: Duration::ZERO,
    }
  }

  /// Records the outcome for one file.
  pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
    self.files.push(FileReport { path, outcome });
  }

  /// Records a subdirectory that could not be listed.
  pub fn record_dir_failure(&mut self, path: PathBuf, err: FileError) {
    self.dir_failures.push(FileReport {
      path,
      outcome: FileOutcome::Failed(err),
    });
  }

  /// Number of failed files. Unreadable directories are not counted.
  pub fn failure_count(&self) -> usize {
    self.files.iter().filter(|file| file.outcome.is_failure()).count()
  }

  /// Iterates over failed files, then unreadable directories, with their errors.
  pub fn failures(&self) -> impl Iterator<Item = (&Path, &FileError)> {
    self
      .files
      .iter()
      .chain(&self.dir_failures)
      .filter_map(|file| match &file.outcome {
        FileOutcome::Failed(err) => Some((file.path.as_path(), err)),
        FileOutcome::Success { .. } => None,
      })
  }

  pub fn failed_paths(&self) -> Vec<&Path> {
    self.failures().map(|(path, _)| path).collect()
  }

  pub fn changed_count(&self) -> usize {
    self
      .files
      .iter()
      .filter(|file| matches!(file.outcome, FileOutcome::Success { changed: true }))
      .count()
  }

  pub fn unchanged_count(&self) -> usize {
    self
      .files
      .iter()
      .filter(|file| matches!(file.outcome, FileOutcome::Success { changed: false }))
      .count()
  }

  pub fn has_error(&self) -> bool {
    !self.dir_failures.is_empty() || self.files.iter().any(|file| file.outcome.is_failure())
  }

  pub fn summary(&self) -> RunSummary {
    RunSummary {
      operation: self.operation.to_string(),
      root: self.root.to_string_lossy().to_string(),
      total_files: self.files.len(),
      changed: self.changed_count(),
      unchanged: self.unchanged_count(),
      failed: self.failure_count(),
      unreadable_directories: self.dir_failures.len(),
      processing_time_seconds: self.elapsed.as_secs_f64(),
      timestamp: Local::now().timestamp(),
    }
  }
}

/// Counts derived from a [`RunReport`].
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  pub operation: String,
  pub root: String,
  pub total_files: usize,
  pub changed: usize,
  pub unchanged: usize,
  pub failed: usize,
  pub unreadable_directories: usize,
  pub processing_time_seconds: f64,
  pub timestamp: i64,
}

/// Serialized form of one [`FileReport`].
#[derive(Debug, Serialize)]
struct FileEntry<'a> {
  path: String,
  status: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  error_kind: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
}

impl<'a> From<&'a FileReport> for FileEntry<'a> {
  fn from(file: &'a FileReport) -> Self {
    let path = file.path.to_string_lossy().to_string();
    match &file.outcome {
      FileOutcome::Success { changed: true } => Self {
        path,
        status: "changed",
        error_kind: None,
        error: None,
      },
      FileOutcome::Success { changed: false } => Self {
        path,
        status: "unchanged",
        error_kind: None,
        error: None,
      },
      FileOutcome::Failed(err) => Self {
        path,
        status: "failed",
        error_kind: Some(err.kind()),
        error: Some(err.to_string()),
      },
    }
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl ReportFormat {
  /// Picks a format from the output file extension, defaulting to JSON.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
      _ => Self::Json,
    }
  }
}

/// Writes a [`RunReport`] to disk.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  pub fn generate(&self, report: &RunReport) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::render_json(report)?,
      ReportFormat::Csv => Self::render_csv(report),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn render_json(report: &RunReport) -> Result<String> {
    let files: Vec<FileEntry<'_>> = report.files.iter().map(FileEntry::from).collect();
    let directories: Vec<FileEntry<'_>> = report.dir_failures.iter().map(FileEntry::from).collect();
    let document = serde_json::json!({
      "summary": report.summary(),
      "files": files,
      "unreadable_directories": directories,
    });
    Ok(serde_json::to_string_pretty(&document)?)
  }

  fn render_csv(report: &RunReport) -> String {
    let mut csv = String::from("file_path,status,error\n");

    for file in report.files.iter().chain(&report.dir_failures) {
      let entry = FileEntry::from(file);
      // Escape commas so each record stays three columns wide
      let path = entry.path.replace(',', "%2C");
      let error = entry.error.unwrap_or_default().replace(',', "%2C");
      csv.push_str(&format!("{},{},{}\n", path, entry.status, error));
    }

    let summary = report.summary();
    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Operation,{}\n", summary.operation));
    csv.push_str(&format!("Files processed,{}\n", summary.total_files));
    csv.push_str(&format!("Changed,{}\n", summary.changed));
    csv.push_str(&format!("Unchanged,{}\n", summary.unchanged));
    csv.push_str(&format!("Failed,{}\n", summary.failed));
    csv.push_str(&format!("Unreadable directories,{}\n", summary.unreadable_directories));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
    csv
  }
}

#[cfg(test)]
mod tests {
  use std::io;

  use super::*;
  use crate::error::TransformError;

  fn sample_report() -> RunReport {
    let mut report = RunReport::new(Operation::InsertBefore, PathBuf::from("/project"));
    report.record(PathBuf::from("/project/A/f1.java"), FileOutcome::Success { changed: true });
    report.record(
      PathBuf::from("/project/B/f2.java"),
      FileOutcome::Failed(FileError::from(TransformError::AlreadyPresent)),
    );
    report.record(PathBuf::from("/project/B/f3.java"), FileOutcome::Success { changed: false });
    report.record(
      PathBuf::from("/project/B/locked.java"),
      FileOutcome::Failed(FileError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))),
    );
    report
  }

  #[test]
  fn test_counts() {
    let report = sample_report();
    assert_eq!(report.files.len(), 4);
    assert_eq!(report.changed_count(), 1);
    assert_eq!(report.unchanged_count(), 1);
    assert_eq!(report.failure_count(), 2);
    assert!(report.has_error());
    assert_eq!(
      report.failed_paths(),
      vec![Path::new("/project/B/f2.java"), Path::new("/project/B/locked.java")]
    );
  }

  #[test]
  fn test_empty_report_has_no_error() {
    let report = RunReport::new(Operation::Remove, PathBuf::from("."));
    assert!(!report.has_error());
    assert_eq!(report.failure_count(), 0);
  }

  #[test]
  fn test_json_rendering() {
    let report = sample_report();
    let json = ReportGenerator::render_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["total_files"], 4);
    assert_eq!(value["summary"]["failed"], 2);
    assert_eq!(value["summary"]["operation"], "insert (top)");
    assert_eq!(value["files"][0]["status"], "changed");
    assert_eq!(value["files"][1]["error_kind"], "already-present");
    assert!(value["files"][0].get("error").is_none());
  }

  #[test]
  fn test_csv_rendering() {
    let mut report = RunReport::new(Operation::Remove, PathBuf::from("/p"));
    report.record(PathBuf::from("/p/a,b.cpp"), FileOutcome::Success { changed: true });
    let csv = ReportGenerator::render_csv(&report);

    assert!(csv.starts_with("file_path,status,error\n"));
    assert!(csv.contains("/p/a%2Cb.cpp,changed,\n"));
    assert!(csv.contains("Files processed,1\n"));
  }

  #[test]
  fn test_unreadable_directory_is_kept_out_of_files() {
    let mut report = RunReport::new(Operation::InsertBefore, PathBuf::from("/p"));
    report.record(PathBuf::from("/p/a.java"), FileOutcome::Success { changed: true });
    report.record_dir_failure(
      PathBuf::from("/p/locked"),
      FileError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
    );

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.failure_count(), 0);
    assert!(report.has_error());
    assert_eq!(report.failed_paths(), vec![Path::new("/p/locked")]);

    let summary = report.summary();
    assert_eq!(summary.total_files, 1);
    assert_eq!(summary.unreadable_directories, 1);

    let json = ReportGenerator::render_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["unreadable_directories"][0]["path"], "/p/locked");
    assert_eq!(value["files"].as_array().map(Vec::len), Some(1));
  }

  #[test]
  fn test_format_from_path() {
    assert_eq!(ReportFormat::from_path(Path::new("out.csv")), ReportFormat::Csv);
    assert_eq!(ReportFormat::from_path(Path::new("out.CSV")), ReportFormat::Csv);
    assert_eq!(ReportFormat::from_path(Path::new("out.json")), ReportFormat::Json);
    assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Json);
  }

  #[test]
  fn test_generate_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    ReportGenerator::new(ReportFormat::Json, &output)
      .generate(&sample_report())
      .unwrap();
    assert!(fs::read_to_string(&output).unwrap().contains("\"files\""));
  }
}
