//! # noticectl
//!
//! Inserts, removes or replaces a copyright notice in every matching file of
//! a directory tree.

use std::process;

use noticectl::cli::{Cli, run_command};
use noticectl::exit_codes;

fn main() {
  let cli = Cli::parse_args();

  let code = match run_command(cli.run_args) {
    Ok(report) if report.has_error() => exit_codes::FAILURE,
    Ok(_) => exit_codes::SUCCESS,
    Err(err) => {
      eprintln!("ERROR: {err}");
      if err.exit_code() != exit_codes::FAILURE {
        eprintln!("For more information, try '--help'.");
      }
      err.exit_code()
    }
  };

  process::exit(code);
}
