#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;

pub const NOTICE: &str = "// This is a sample notice 1\n// This is a sample notice 2";
pub const NEW_NOTICE: &str = "// Copyright (c) 2025 New Owner";

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Builds the tree `A/f1.java`, `B/f2.java`, `B/f3.txt` under `root`.
pub fn create_sample_tree(root: &Path) -> Result<()> {
  write_file(root, "A/f1.java", "public class F1 {}\n")?;
  write_file(root, "B/f2.java", "public class F2 {}\n")?;
  write_file(root, "B/f3.txt", "plain text, not source\n")?;
  Ok(())
}

/// A `noticectl` command isolated from any config in the environment.
pub fn noticectl(current_dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("noticectl")?;
  cmd
    .current_dir(current_dir)
    .env_remove("NOTICECTL_CONFIG")
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  Ok(cmd)
}
