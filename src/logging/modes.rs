use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;

/// Global atomic value holding the current [`OutputMode`].
///
/// This is initialized to `0` (Normal) until changed via [`OutputMode::apply`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

/// How much user-facing output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }

  /// Picks the mode for the `-q` flag and the `-v` count. Quiet wins.
  pub const fn from_flags(verbosity: u8, quiet: bool) -> Self {
    if quiet {
      OutputMode::Quiet
    } else if verbosity > 0 {
      OutputMode::Verbose
    } else {
      OutputMode::Normal
    }
  }

  /// Makes this the global output mode.
  pub fn apply(self) {
    OUTPUT_MODE.store(self as u8, Ordering::SeqCst);
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Configures owo-colors for this mode.
  ///
  /// `Auto` leaves the decision to owo-colors' own terminal detection.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Returns the current global output mode.
pub fn output_mode() -> OutputMode {
  OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst))
}

/// `true` if verbose output is enabled.
pub fn is_verbose() -> bool {
  matches!(output_mode(), OutputMode::Verbose)
}

/// `true` if quiet mode is enabled.
pub fn is_quiet() -> bool {
  matches!(output_mode(), OutputMode::Quiet)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_output_mode_from_flags() {
    assert_eq!(OutputMode::from_flags(0, false), OutputMode::Normal);
    assert_eq!(OutputMode::from_flags(2, false), OutputMode::Verbose);
    assert_eq!(OutputMode::from_flags(3, true), OutputMode::Quiet);
  }

  #[test]
  fn test_output_mode_round_trips_through_u8() {
    for mode in [OutputMode::Normal, OutputMode::Quiet, OutputMode::Verbose] {
      assert_eq!(OutputMode::from_u8(mode as u8), mode);
    }
    assert_eq!(OutputMode::from_u8(42), OutputMode::Normal);
  }
}
