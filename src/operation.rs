//! # Operation Module
//!
//! Resolves a command name into an [`Operation`] and binds it to the notices
//! it needs as a [`NoticeEdit`], the single transformation the processor
//! applies to every matching file.

use std::fmt;

use crate::error::{RunError, TransformError};
use crate::notice::Notice;
use crate::processor::notice_transform;

/// The transformation applied to each matching file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  /// Prepend the notice unless the file already starts with it.
  InsertBefore,
  /// Append the notice at the end of the file.
  InsertAfter,
  /// Delete the first occurrence of the notice.
  Remove,
  /// Swap the notice for a new one.
  Replace,
}

impl Operation {
  /// Maps a command name and the `bottom` flag to an operation.
  ///
  /// `bottom` only affects `insert`.
  pub fn resolve(command: &str, bottom: bool) -> Result<Self, RunError> {
    match command {
      "insert" if bottom => Ok(Self::InsertAfter),
      "insert" => Ok(Self::InsertBefore),
      "remove" => Ok(Self::Remove),
      "replace" => Ok(Self::Replace),
      other => Err(RunError::UnknownCommand(other.to_string())),
    }
  }

  /// Whether this operation needs a replacement notice.
  pub const fn needs_new_notice(self) -> bool {
    matches!(self, Self::Replace)
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::InsertBefore => "insert (top)",
      Self::InsertAfter => "insert (bottom)",
      Self::Remove => "remove",
      Self::Replace => "replace",
    };
    f.write_str(name)
  }
}

/// An operation together with the notice text it works with.
#[derive(Debug, Clone)]
pub enum NoticeEdit {
  InsertBefore(Notice),
  InsertAfter(Notice),
  Remove(Notice),
  Replace { old: Notice, new: Notice },
}

impl NoticeEdit {
  /// Binds `operation` to its notices.
  ///
  /// `replace` requires `new_notice`; the other operations ignore it.
  pub fn new(operation: Operation, notice: Notice, new_notice: Option<Notice>) -> Result<Self, RunError> {
    let edit = match operation {
      Operation::InsertBefore => Self::InsertBefore(notice),
      Operation::InsertAfter => Self::InsertAfter(notice),
      Operation::Remove => Self::Remove(notice),
      Operation::Replace => {
        let new = new_notice.ok_or_else(|| RunError::argument("the replace command requires --new-notice"))?;
        Self::Replace { old: notice, new }
      }
    };
    Ok(edit)
  }

  pub const fn operation(&self) -> Operation {
    match self {
      Self::InsertBefore(_) => Operation::InsertBefore,
      Self::InsertAfter(_) => Operation::InsertAfter,
      Self::Remove(_) => Operation::Remove,
      Self::Replace { .. } => Operation::Replace,
    }
  }

  /// Computes the new full text of a file.
  pub fn apply(&self, text: &str) -> Result<String, TransformError> {
    match self {
      Self::InsertBefore(notice) => notice_transform::insert_before(text, notice.as_str()),
      Self::InsertAfter(notice) => Ok(notice_transform::insert_after(text, notice.as_str())),
      Self::Remove(notice) => Ok(notice_transform::remove(text, notice.as_str())),
      Self::Replace { old, new } => Ok(notice_transform::replace(text, old.as_str(), new.as_str())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn notice(text: &str) -> Notice {
    Notice::literal(text).unwrap()
  }

  #[test]
  fn test_resolve_commands() {
    assert_eq!(Operation::resolve("insert", false).unwrap(), Operation::InsertBefore);
    assert_eq!(Operation::resolve("insert", true).unwrap(), Operation::InsertAfter);
    assert_eq!(Operation::resolve("remove", false).unwrap(), Operation::Remove);
    assert_eq!(Operation::resolve("remove", true).unwrap(), Operation::Remove);
    assert_eq!(Operation::resolve("replace", false).unwrap(), Operation::Replace);
  }

  #[test]
  fn test_resolve_unknown_command() {
    let err = Operation::resolve("Insert", false).unwrap_err();
    assert!(matches!(err, RunError::UnknownCommand(ref name) if name == "Insert"));
  }

  #[test]
  fn test_replace_requires_new_notice() {
    let result = NoticeEdit::new(Operation::Replace, notice("// old"), None);
    assert!(matches!(result, Err(RunError::Argument(_))));
  }

  #[test]
  fn test_new_notice_ignored_outside_replace() {
    let edit = NoticeEdit::new(Operation::Remove, notice("// old"), Some(notice("// new"))).unwrap();
    assert_eq!(edit.operation(), Operation::Remove);
    assert_eq!(edit.apply("// old\ncode").unwrap(), "code");
  }

  #[test]
  fn test_apply_dispatches_per_variant() {
    let top = NoticeEdit::new(Operation::InsertBefore, notice("// n"), None).unwrap();
    assert_eq!(top.apply("code").unwrap(), "// n\ncode");
    assert_eq!(top.apply("// n\ncode"), Err(TransformError::AlreadyPresent));

    let bottom = NoticeEdit::new(Operation::InsertAfter, notice("// n"), None).unwrap();
    assert_eq!(bottom.apply("code").unwrap(), "code\n// n");

    let swap = NoticeEdit::new(Operation::Replace, notice("// old notice"), Some(notice("// new notice"))).unwrap();
    assert_eq!(swap.apply("// old notice\ncode").unwrap(), "// new notice\ncode");
  }
}
