//! Command-line argument definitions.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::PomError;

/// One-line usage string shown alongside argument-validation errors.
pub const USAGE: &str = "usage: pom <work_interval_minutes> <rest_interval_minutes>";

/// Command-line interface for the pom timer.
#[derive(Debug, Parser)]
#[command(name = "pom")]
#[command(about = "An interval timer for the Pomodoro technique")]
#[command(long_about = "pom - a command-line Pomodoro timer

Alternates work and rest intervals of the given lengths, prompting before
each interval and playing an audible alert when one completes. The session
runs until interrupted with Ctrl-C, then prints a summary of completed
work intervals.

EXAMPLES:
  pom 25 5     Classic pomodoro: 25 minutes of work, 5 of rest
  pom 50 10    Longer focus blocks
  pom 0 0      Zero-length intervals complete immediately

CONFIGURATION:
  ~/.pom/config.yaml may override the alert sound path and color output.")]
#[command(version)]
pub struct Cli {
    /// Length of each work interval, in minutes
    #[arg(value_name = "work_interval_minutes", allow_negative_numbers = true)]
    pub work: i64,

    /// Length of each rest interval, in minutes
    #[arg(value_name = "rest_interval_minutes", allow_negative_numbers = true)]
    pub rest: i64,

    /// Output format for the end-of-session summary
    ///
    /// Use 'pretty' for the human-readable one-liner (default), or 'json'
    /// for a machine-readable summary suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,
}

/// Output format for the end-of-session summary.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable one-line summary.
    #[default]
    Pretty,
    /// Machine-readable JSON summary.
    Json,
}

impl Cli {
    /// Validate the parsed interval lengths.
    ///
    /// # Errors
    ///
    /// Returns `PomError::InvalidArgument` if either interval is negative.
    /// Zero is accepted; a zero-length interval completes immediately.
    pub fn durations(&self) -> Result<(u64, u64), PomError> {
        let work = non_negative(self.work, "work_interval_minutes")?;
        let rest = non_negative(self.rest, "rest_interval_minutes")?;
        Ok((work, rest))
    }
}

fn non_negative(minutes: i64, name: &str) -> Result<u64, PomError> {
    u64::try_from(minutes).map_err(|_| {
        PomError::InvalidArgument(format!("{name} must be non-negative, got {minutes}"))
    })
}
