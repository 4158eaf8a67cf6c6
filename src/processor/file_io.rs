//! # File I/O Module
//!
//! This module provides the file reading, writing and copying primitives the
//! processor calls. They are reached through the [`FileAccess`] trait so the
//! walker can be exercised against failing implementations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

/// File access operations used by the processor and the run coordinator.
pub trait FileAccess: Send + Sync {
  /// Reads the complete content of a file as UTF-8 text.
  fn read_text(&self, path: &Path) -> io::Result<String>;

  /// Replaces the complete content of a file.
  ///
  /// Implementations must not leave a partially written file behind when
  /// they return an error.
  fn overwrite(&self, path: &Path, content: &str) -> io::Result<()>;

  /// Copies the directory tree rooted at `from` into `to`, creating `to` if
  /// needed and overwriting files that already exist there.
  fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Default [`FileAccess`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileIO;

impl FileAccess for FileIO {
  fn read_text(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  /// Writes `content` to a temporary sibling and renames it over `path`.
  ///
  /// The rename is atomic on the same filesystem, so a failure at any point
  /// leaves the original file untouched.
  fn overwrite(&self, path: &Path, content: &str) -> io::Result<()> {
    let tmp_path = temp_sibling(path)?;

    let result = write_then_rename(path, &tmp_path, content);
    if result.is_err() {
      // Best effort; the write error is returned either way.
      let _ = fs::remove_file(&tmp_path);
    }
    result
  }

  fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;

    for entry in WalkDir::new(from).min_depth(1) {
      let entry = entry?;
      let relative = entry
        .path()
        .strip_prefix(from)
        .map_err(|e| io::Error::other(e.to_string()))?;
      let target = to.join(relative);

      let file_type = entry.file_type();
      if file_type.is_dir() {
        fs::create_dir_all(&target)?;
      } else if file_type.is_file() {
        trace!("Copying {} -> {}", entry.path().display(), target.display());
        fs::copy(entry.path(), &target)?;
      }
    }

    Ok(())
  }
}

fn write_then_rename(path: &Path, tmp_path: &Path, content: &str) -> io::Result<()> {
  fs::write(tmp_path, content)?;
  // Keep the original file mode (executable scripts stay executable).
  let permissions = fs::metadata(path)?.permissions();
  fs::set_permissions(tmp_path, permissions)?;
  fs::rename(tmp_path, path)
}

/// Builds `.<file name>.noticectl-tmp` next to `path`.
fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
  let file_name = path
    .file_name()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("{} has no file name", path.display())))?;

  let mut tmp_name = std::ffi::OsString::from(".");
  tmp_name.push(file_name);
  tmp_name.push(".noticectl-tmp");
  Ok(path.with_file_name(tmp_name))
}
