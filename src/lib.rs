//! # noticectl
//!
//! A tool that inserts, removes or replaces a copyright notice block in every
//! source file of a directory tree, selected by file extension.
//!
//! The notice is treated as opaque text: no comment syntax is inferred. Each
//! matching file is read, transformed and atomically rewritten. A failure on
//! one file is recorded and the walk continues; the run as a whole fails if
//! any file failed.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use noticectl::file_filter::ExtensionFilter;
//! use noticectl::notice::Notice;
//! use noticectl::operation::{NoticeEdit, Operation};
//! use noticectl::processor::{FileIO, Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let notice = Notice::load(Path::new("NOTICE.txt"), &FileIO)?;
//!     let edit = NoticeEdit::new(Operation::InsertBefore, notice, None)?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(edit, ExtensionFilter::new([".java", ".cpp"])));
//!     let report = processor.walk(Path::new("src"))?;
//!
//!     for path in report.failed_paths() {
//!         println!("failed: {}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Tree walking and per-file transformation
//! * [`operation`] - Command resolution and notice edits
//! * [`cli`] - Argument parsing and the run coordinator
//! * [`logging`] - Run-scoped tracing setup and output modes

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod file_filter;
pub mod logging;
pub mod notice;
pub mod operation;
pub mod output;
pub mod processor;
pub mod report;
