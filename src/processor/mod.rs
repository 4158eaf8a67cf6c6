//! # Processor Module
//!
//! This module walks a directory tree and applies one [`NoticeEdit`] to every
//! file selected by the extension filter.
//!
//! The module is organized into two submodules:
//! - [`file_io`] - File reading, atomic overwriting and tree copying
//! - [`notice_transform`] - Pure text transformations for each operation
//!
//! The [`Processor`] struct is the entry point. It never stops on a per-file
//! failure: every problem is recorded in the returned [`RunReport`] and the
//! walk moves on to the next entry.

mod file_io;
pub mod notice_transform;

use std::fs::{self, DirEntry, FileType};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use file_io::{FileAccess, FileIO};
pub use notice_transform::LINE_SEPARATOR;
use tracing::{debug, info, trace, warn};

use crate::error::{FileError, RunError};
use crate::file_filter::{ExtensionFilter, FileFilter};
use crate::operation::NoticeEdit;
use crate::report::{FileOutcome, RunReport};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Transformation applied to each selected file
  pub edit: NoticeEdit,
  /// Extensions selecting the files to transform
  pub extension_filter: ExtensionFilter,
  /// File access implementation; defaults to [`FileIO`]
  pub file_access: Option<Box<dyn FileAccess>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig using the local filesystem.
  ///
  /// Use struct update syntax to override the file access:
  /// ```ignore
  /// ProcessorConfig {
  ///     file_access: Some(Box::new(MyFileAccess)),
  ///     ..ProcessorConfig::new(edit, extension_filter)
  /// }
  /// ```
  pub const fn new(edit: NoticeEdit, extension_filter: ExtensionFilter) -> Self {
    Self {
      edit,
      extension_filter,
      file_access: None,
    }
  }
}

/// Processor for applying a notice edit across a directory tree.
///
/// The walk is depth-first. The entries of a directory are listed before any
/// of them is handled, so files created during the walk (such as temporary
/// siblings written by an overwrite) are never visited. Symbolic links are
/// skipped rather than followed.
pub struct Processor {
  /// Transformation applied to every selected file
  edit: NoticeEdit,

  /// Filter deciding which files are transformed
  file_filter: ExtensionFilter,

  /// File reads and writes go through here
  file_access: Box<dyn FileAccess>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      edit: config.edit,
      file_filter: config.extension_filter,
      file_access: config.file_access.unwrap_or_else(|| Box::new(FileIO)),
    }
  }

  /// Walks the tree rooted at `root` and returns one outcome per selected file.
  ///
  /// # Errors
  ///
  /// Returns [`RunError::Root`] if `root` is missing, is not a directory or
  /// cannot be listed. Everything below the root is reported per entry.
  pub fn walk(&self, root: &Path) -> Result<RunReport, RunError> {
    let start = Instant::now();
    let root_error = |source: io::Error| RunError::Root {
      path: root.to_path_buf(),
      source,
    };

    let metadata = fs::metadata(root).map_err(root_error)?;
    if !metadata.is_dir() {
      return Err(root_error(io::Error::other("not a directory")));
    }
    let entries = list_dir(root).map_err(root_error)?;

    info!(
      "Applying {} to files under {} matching {:?}",
      self.edit.operation(),
      root.display(),
      self.file_filter.extensions()
    );

    let mut report = RunReport::new(self.edit.operation(), root.to_path_buf());
    self.walk_entries(entries, &mut report);
    report.elapsed = start.elapsed();

    debug!(
      "Walk finished in {:.2?}: {} files, {} failed",
      report.elapsed,
      report.files.len(),
      report.failure_count()
    );
    Ok(report)
  }

  fn walk_dir(&self, dir: &Path, report: &mut RunReport) {
    match list_dir(dir) {
      Ok(entries) => self.walk_entries(entries, report),
      Err(err) => {
        warn!("Cannot list directory {}: {}", dir.display(), err);
        report.record_dir_failure(dir.to_path_buf(), FileError::from(err));
      }
    }
  }

  fn walk_entries(&self, entries: Vec<DirEntry>, report: &mut RunReport) {
    for entry in entries {
      self.visit(entry.path(), entry.file_type(), report);
    }
  }

  fn visit(&self, path: PathBuf, file_type: io::Result<FileType>, report: &mut RunReport) {
    let file_type = match file_type {
      Ok(file_type) => file_type,
      // Without a file type only the name can select the entry.
      Err(err) if self.file_filter.should_process(&path).should_process => {
        warn!("Cannot stat {}: {}", path.display(), err);
        report.record(path, FileOutcome::Failed(FileError::from(err)));
        return;
      }
      Err(err) => {
        debug!("Cannot stat unselected entry {}: {}", path.display(), err);
        return;
      }
    };

    if file_type.is_symlink() {
      trace!("Skipping symlink: {}", path.display());
    } else if file_type.is_dir() {
      trace!("Entering directory: {}", path.display());
      self.walk_dir(&path, report);
    } else if self.file_filter.should_process(&path).should_process {
      let outcome = self.process_file(&path);
      report.record(path, outcome);
    }
  }

  /// Reads, transforms and (if the text changed) rewrites a single file.
  pub fn process_file(&self, path: &Path) -> FileOutcome {
    match self.transform_file(path) {
      Ok(true) => {
        info!("Updated: {}", path.display());
        FileOutcome::Success { changed: true }
      }
      Ok(false) => {
        debug!("Unchanged: {}", path.display());
        FileOutcome::Success { changed: false }
      }
      Err(err) => {
        warn!("Failed: {}: {}", path.display(), err);
        FileOutcome::Failed(err)
      }
    }
  }

  fn transform_file(&self, path: &Path) -> Result<bool, FileError> {
    let text = self.file_access.read_text(path)?;
    let updated = self.edit.apply(&text)?;
    if updated == text {
      return Ok(false);
    }
    self.file_access.overwrite(path, &updated)?;
    Ok(true)
  }
}

/// Lists a directory completely before any entry is handled.
fn list_dir(dir: &Path) -> io::Result<Vec<DirEntry>> {
  fs::read_dir(dir)?.collect()
}

/// Copies `root` to `output` so the walk can operate on the copy.
pub fn copy_root(file_access: &dyn FileAccess, root: &Path, output: &Path) -> Result<PathBuf, RunError> {
  info!("Copying {} to {}", root.display(), output.display());
  file_access.copy_tree(root, output).map_err(|source| RunError::Copy {
    from: root.to_path_buf(),
    to: output.to_path_buf(),
    source,
  })?;
  Ok(output.to_path_buf())
}
