//! Timed execution of a single interval.
//!
//! The runner blocks the calling thread until the interval's duration has
//! elapsed on the monotonic clock or the session is cancelled, emitting one
//! progress report per poll. The poll is deliberately coarse: completion is
//! accurate to within one poll period because elapsed time is measured
//! against the clock, not against the number of polls.

use std::fmt;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;

/// Fixed pause between progress checks while an interval runs.
pub const POLL_PERIOD: Duration = Duration::from_secs(30);

/// Outcome of running one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalOutcome {
    /// The full duration elapsed.
    Completed,
    /// The cancellation token fired mid-interval.
    Cancelled,
}

/// One progress observation during a running interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Rounded completion percentage, 0-100.
    pub percentage: u32,
    /// Minutes elapsed since the interval started.
    pub elapsed_minutes: f64,
    /// Target duration in minutes.
    pub target_minutes: f64,
}

impl ProgressReport {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn at(elapsed_minutes: f64, target_minutes: f64) -> Self {
        Self {
            percentage: (elapsed_minutes / target_minutes * 100.0).round() as u32,
            elapsed_minutes,
            target_minutes,
        }
    }

    const fn completed(elapsed_minutes: f64, target_minutes: f64) -> Self {
        Self {
            percentage: 100,
            elapsed_minutes,
            target_minutes,
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\t[{:>3}%]\t{:.2} of {:.2} minutes",
            self.percentage, self.elapsed_minutes, self.target_minutes
        )
    }
}

/// Runs a single countdown, reporting progress at each poll.
#[derive(Debug, Clone)]
pub struct IntervalRunner {
    cancel: CancelToken,
    poll_period: Duration,
}

impl IntervalRunner {
    /// Runner with the standard 30-second poll period.
    #[must_use]
    pub fn new(cancel: CancelToken) -> Self {
        Self::with_poll_period(cancel, POLL_PERIOD)
    }

    /// Runner with a custom poll period.
    #[must_use]
    pub fn with_poll_period(cancel: CancelToken, poll_period: Duration) -> Self {
        Self {
            cancel,
            poll_period,
        }
    }

    /// Block until `minutes` have elapsed or the session is cancelled.
    ///
    /// Progress reports are delivered to `on_progress`: one per poll while
    /// running, plus a final report at 100% on normal completion. A
    /// cancelled run emits no completion report. Negative durations never
    /// reach this point; they are rejected at the CLI boundary.
    pub fn run<F>(&self, minutes: f64, mut on_progress: F) -> IntervalOutcome
    where
        F: FnMut(ProgressReport),
    {
        if self.cancel.is_cancelled() {
            return IntervalOutcome::Cancelled;
        }

        // Zero-length intervals are legal and complete immediately; this
        // also guards the percentage division below.
        if minutes <= 0.0 {
            on_progress(ProgressReport::completed(0.0, minutes.max(0.0)));
            return IntervalOutcome::Completed;
        }

        let start = Instant::now();
        loop {
            let elapsed_minutes = start.elapsed().as_secs_f64() / 60.0;
            if elapsed_minutes >= minutes {
                on_progress(ProgressReport::completed(elapsed_minutes, minutes));
                return IntervalOutcome::Completed;
            }

            on_progress(ProgressReport::at(elapsed_minutes, minutes));

            if self.cancel.wait_timeout(self.poll_period) {
                return IntervalOutcome::Cancelled;
            }
        }
    }
}
