//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing. The command name is a plain positional
//! value rather than a clap subcommand so that an unknown command can be
//! reported with its own exit code.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run_command};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("NOTICECTL_GIT_HASH"),
  " ",
  env!("NOTICECTL_GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Put the notice in NOTICE.txt at the top of every Java and C++ file
  noticectl insert -r src -e .java .cpp -n NOTICE.txt

  # Append the notice at the bottom, separated by a blank line
  noticectl insert -r src -e .py -n NOTICE.txt --bottom --blank

  # Remove a one-line notice given as literal text
  noticectl remove -r src -e .cs -s -n \"// Copyright (c) Acme\"

  # Replace an old notice, working on a copy and keeping a run log
  noticectl replace -r src -e .java -n OLD.txt -N NEW.txt -o /tmp/relicensed --info
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_full_command_line() {
    let cli = Cli::try_parse_from([
      "noticectl", "replace", "-r", "src", "-e", ".java", ".cpp", "-n", "old.txt", "-N", "new.txt", "-B", "-vv",
    ])
    .unwrap();
    let args = cli.run_args;

    assert_eq!(args.command, "replace");
    assert_eq!(args.root.to_str(), Some("src"));
    assert_eq!(args.extensions, vec![".java".to_string(), ".cpp".to_string()]);
    assert_eq!(args.notice, "old.txt");
    assert_eq!(args.new_notice.as_deref(), Some("new.txt"));
    assert!(args.blank);
    assert!(!args.bottom);
    assert_eq!(args.verbose, 2);
  }

  #[test]
  fn test_root_and_notice_are_required() {
    assert!(Cli::try_parse_from(["noticectl", "insert", "-n", "n.txt", "-e", ".rs"]).is_err());
    assert!(Cli::try_parse_from(["noticectl", "insert", "-r", "src", "-e", ".rs"]).is_err());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["noticectl", "insert", "-r", "s", "-n", "n", "-q", "-v"]).is_err());
  }
}
