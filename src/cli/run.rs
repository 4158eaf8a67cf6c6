//! # Run Command
//!
//! This module turns parsed arguments into one run: resolve the operation,
//! merge the config file, load the notices, optionally copy the tree, install
//! logging, walk, then report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use crate::config::{Config, load_config};
use crate::error::RunError;
use crate::file_filter::ExtensionFilter;
use crate::logging::{ColorMode, OutputMode, RunLogging};
use crate::notice::{BlankLine, Notice};
use crate::operation::{NoticeEdit, Operation};
use crate::output::print_outcome;
use crate::processor::{FileAccess, FileIO, Processor, ProcessorConfig, copy_root};
use crate::report::{ReportFormat, ReportGenerator, RunReport};

/// Arguments for a run
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Operation to perform: insert, remove or replace
  #[arg(value_name = "COMMAND")]
  pub command: String,

  /// Root directory of the tree to process
  #[arg(long, short = 'r', value_name = "DIR")]
  pub root: PathBuf,

  /// File name suffixes to process, including the dot (e.g. .java .cpp)
  #[arg(long = "extension", short = 'e', value_name = "EXT", num_args = 1..)]
  pub extensions: Vec<String>,

  /// Notice file, or the notice text itself with --string
  #[arg(long, short = 'n', value_name = "PATH|TEXT")]
  pub notice: String,

  /// Replacement notice for the replace command
  #[arg(long, short = 'N', value_name = "PATH|TEXT")]
  pub new_notice: Option<String>,

  /// Treat --notice and --new-notice as literal text instead of file paths
  #[arg(long, short = 's')]
  pub string: bool,

  /// Insert at the bottom of files instead of the top
  #[arg(long, short = 'b')]
  pub bottom: bool,

  /// Separate the notice from the file content with a blank line
  #[arg(long, short = 'B')]
  pub blank: bool,

  /// Write a detailed run log into the root directory
  #[arg(long)]
  pub info: bool,

  /// Copy the root tree to DIR first and process the copy
  #[arg(long, short = 'o', value_name = "DIR")]
  pub output: Option<PathBuf>,

  /// Write a report of every processed file (JSON, or CSV for a .csv path)
  #[arg(long, value_name = "FILE")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .noticectl.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run with the given arguments.
///
/// Returns the report of the walk; the caller decides the exit code from
/// [`RunReport::has_error`]. Errors returned here happen before the walk,
/// except for a failure to write the report file.
pub fn run_command(args: RunArgs) -> Result<RunReport, RunError> {
  OutputMode::from_flags(args.verbose, args.quiet).apply();
  args.colors.apply();

  let _stderr_logging = RunLogging::install(args.verbose, args.quiet, None)?;

  let operation = Operation::resolve(&args.command, args.bottom)?;
  debug!("Resolved operation: {}", operation);

  let config = load_config(args.config.as_deref(), Path::new("."), args.no_config)?.unwrap_or_default();

  let extension_filter = resolve_extensions(&args, &config)?;
  let blank = args.blank || config.blank.unwrap_or(false);

  let file_access = FileIO;
  let edit = load_edit(&args, operation, blank, &file_access)?;

  check_root(&args.root)?;
  let root = match &args.output {
    Some(output) => {
      check_output(&args.root, output)?;
      copy_root(&file_access, &args.root, output)?
    }
    None => args.root.clone(),
  };

  let log_path = args.info.then(|| root.join(config.log_file_name()));
  let logging = RunLogging::install(args.verbose, args.quiet, log_path.as_deref())?;

  let processor = Processor::new(ProcessorConfig::new(edit, extension_filter));
  let report = processor.walk(&root)?;

  print_outcome(&report, logging.log_path());

  if let Some(report_path) = &args.report_json {
    ReportGenerator::new(ReportFormat::from_path(report_path), report_path)
      .generate(&report)
      .map_err(|err| RunError::Report {
        path: report_path.clone(),
        message: format!("{err:#}"),
      })?;
    debug!("Report written to {}", report_path.display());
  }

  Ok(report)
}

/// Command-line extensions win; the config file is the fallback.
fn resolve_extensions(args: &RunArgs, config: &Config) -> Result<ExtensionFilter, RunError> {
  let filter = if args.extensions.is_empty() {
    ExtensionFilter::new(config.extensions.iter().cloned())
  } else {
    ExtensionFilter::new(args.extensions.iter().cloned())
  };

  if filter.is_empty() {
    return Err(RunError::argument(
      "at least one --extension is required (or `extensions` in the config file)",
    ));
  }
  Ok(filter)
}

/// Loads the notice(s) and binds them to `operation`.
fn load_edit(args: &RunArgs, operation: Operation, blank: bool, file_access: &dyn FileAccess) -> Result<NoticeEdit, RunError> {
  let read = |value: &str| {
    if args.string {
      Notice::literal(value)
    } else {
      Notice::load(Path::new(value), file_access)
    }
  };

  let mut notice = read(args.notice.as_str())?;
  let mut new_notice = match &args.new_notice {
    Some(value) if operation.needs_new_notice() => Some(read(value.as_str())?),
    Some(_) => {
      debug!("Ignoring --new-notice for {}", operation);
      None
    }
    None => None,
  };

  if blank {
    let position = if operation == Operation::InsertAfter {
      BlankLine::Before
    } else {
      BlankLine::After
    };
    notice = notice.with_blank_line(position);
    new_notice = new_notice.map(|n| n.with_blank_line(position));
  }

  NoticeEdit::new(operation, notice, new_notice)
}

fn check_root(root: &Path) -> Result<(), RunError> {
  let metadata = fs::metadata(root).map_err(|source| RunError::Root {
    path: root.to_path_buf(),
    source,
  })?;
  if !metadata.is_dir() {
    return Err(RunError::Root {
      path: root.to_path_buf(),
      source: io::Error::other("not a directory"),
    });
  }
  Ok(())
}

/// Rejects an output directory that overlaps the root in either direction.
///
/// An output inside the root would be copied into itself. A root inside the
/// output would be walked as part of the copy, so the originals get edited.
/// Both sides are compared with symlinks resolved.
fn check_output(root: &Path, output: &Path) -> Result<(), RunError> {
  let root_abs = fs::canonicalize(root).map_err(|source| RunError::Root {
    path: root.to_path_buf(),
    source,
  })?;
  let output_abs = canonicalize_existing_prefix(output)
    .map_err(|e| RunError::argument(format!("invalid --output {}: {}", output.display(), e)))?;
  debug!("Output {} resolves to {}", output.display(), output_abs.display());

  if output_abs.starts_with(&root_abs) {
    return Err(RunError::argument(format!(
      "--output {} must not be inside --root {}",
      output.display(),
      root.display()
    )));
  }
  if root_abs.starts_with(&output_abs) {
    return Err(RunError::argument(format!(
      "--root {} must not be inside --output {}",
      root.display(),
      output.display()
    )));
  }
  Ok(())
}

/// Canonicalizes the longest existing ancestor of `path`, then re-appends
/// the components that do not exist yet.
fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
  let absolute = std::path::absolute(path)?;
  let mut missing = Vec::new();
  let mut current = absolute.as_path();

  loop {
    match fs::canonicalize(current) {
      Ok(resolved) => return Ok(missing.iter().rev().fold(resolved, |acc: PathBuf, name| acc.join(name))),
      Err(err) => match (current.parent(), current.file_name()) {
        (Some(parent), Some(name)) => {
          missing.push(name);
          current = parent;
        }
        _ => return Err(err),
      },
    }
  }
}
