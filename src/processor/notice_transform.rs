//! # Notice Transform Module
//!
//! Pure functions that rewrite the full text of a file with respect to a
//! notice. None of them perform I/O.
//!
//! | Function          | Effect                                              |
//! |-------------------|-----------------------------------------------------|
//! | [`insert_before`] | prepend the notice, refusing if it is already there |
//! | [`insert_after`]  | append the notice, unconditionally                  |
//! | [`remove`]        | delete the first occurrence, then trim              |
//! | [`replace`]       | remove the old notice, prepend the new one          |

use crate::error::TransformError;

/// Separator placed between a notice and the rest of the file.
pub const LINE_SEPARATOR: &str = "\n";

/// Prepends `notice` to `text`.
///
/// Fails with [`TransformError::AlreadyPresent`] when `text` already starts
/// with `notice`, comparing from the very first character.
pub fn insert_before(text: &str, notice: &str) -> Result<String, TransformError> {
  if text.starts_with(notice) {
    return Err(TransformError::AlreadyPresent);
  }
  Ok(prepend(text, notice))
}

/// Appends `notice` to the end of `text`, preceded by a line separator.
///
/// There is no "already inserted" check here, unlike [`insert_before`].
pub fn insert_after(text: &str, notice: &str) -> String {
  let mut out = String::with_capacity(text.len() + LINE_SEPARATOR.len() + notice.len());
  out.push_str(text);
  out.push_str(LINE_SEPARATOR);
  out.push_str(notice);
  out
}

/// Deletes the first literal occurrence of `notice` and trims the result.
///
/// A missing notice is not an error: the trimmed original is returned.
pub fn remove(text: &str, notice: &str) -> String {
  match text.find(notice) {
    Some(start) => {
      let mut out = String::with_capacity(text.len() - notice.len());
      out.push_str(&text[..start]);
      out.push_str(&text[start + notice.len()..]);
      out.trim().to_string()
    }
    None => text.trim().to_string(),
  }
}

/// Swaps `old_notice` for `new_notice` at the top of the file.
///
/// Composed as [`remove`] followed by an unconditional prepend, so it never
/// reports [`TransformError::AlreadyPresent`].
pub fn replace(text: &str, old_notice: &str, new_notice: &str) -> String {
  prepend(&remove(text, old_notice), new_notice)
}

fn prepend(text: &str, notice: &str) -> String {
  let mut out = String::with_capacity(notice.len() + LINE_SEPARATOR.len() + text.len());
  out.push_str(notice);
  out.push_str(LINE_SEPARATOR);
  out.push_str(text);
  out
}
