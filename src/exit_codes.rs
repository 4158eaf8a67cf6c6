//! Stable exit codes for the noticectl binary.

/// Every matching file was processed successfully.
pub const SUCCESS: i32 = 0;
/// At least one file failed, or the copy/log setup failed.
pub const FAILURE: i32 = 1;
/// Malformed or missing arguments, unreadable notice, invalid config.
pub const USAGE: i32 = 2;
/// The command name is not one of insert, remove, replace.
pub const UNKNOWN_COMMAND: i32 = 3;
