//! Session state for alternating work and rest intervals.
//!
//! A session is the full run of alternating intervals from program start to
//! cancellation. The state here is pure: it tracks which interval is current
//! and how many work intervals have completed, and performs no I/O.

pub mod driver;
pub mod runner;

use chrono::{DateTime, Local};
use serde::Serialize;

/// The kind of a single interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    /// A focused work period.
    Work,
    /// A rest period between work intervals.
    Rest,
}

impl IntervalKind {
    /// Lowercase name used in prompts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Rest => "rest",
        }
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tracks which interval is current and how many work intervals have
/// completed.
///
/// Positions are numbered from 1 and only ever increase. Odd positions are
/// work intervals and even positions are rest intervals, so every session
/// opens with work. Once `advance` has moved past a position, the number of
/// completed work intervals is `position / 2` (integer division): after the
/// first work interval the position is 2 and one work interval counts as
/// done.
#[derive(Debug, Clone)]
pub struct SessionState {
    work_minutes: u64,
    rest_minutes: u64,
    sequence_position: u64,
    started_at: DateTime<Local>,
}

impl SessionState {
    /// Create a session positioned at its first (work) interval.
    ///
    /// Zero-length intervals are legal; they complete immediately when run.
    #[must_use]
    pub fn new(work_minutes: u64, rest_minutes: u64) -> Self {
        Self {
            work_minutes,
            rest_minutes,
            sequence_position: 1,
            started_at: Local::now(),
        }
    }

    /// The kind of the interval currently being prompted or run.
    #[must_use]
    pub const fn current_interval_kind(&self) -> IntervalKind {
        if self.sequence_position % 2 == 1 {
            IntervalKind::Work
        } else {
            IntervalKind::Rest
        }
    }

    /// Configured duration of the current interval, in minutes.
    #[must_use]
    pub const fn current_interval_minutes(&self) -> u64 {
        match self.current_interval_kind() {
            IntervalKind::Work => self.work_minutes,
            IntervalKind::Rest => self.rest_minutes,
        }
    }

    /// Mark the current interval complete and move to the next one.
    ///
    /// The counter only grows; a session has no terminal position and runs
    /// until externally cancelled.
    pub fn advance(&mut self) {
        self.sequence_position += 1;
    }

    /// Number of work intervals completed so far.
    #[must_use]
    pub const fn completed_work_intervals(&self) -> u64 {
        self.sequence_position / 2
    }

    /// Configured work interval length in minutes.
    #[must_use]
    pub const fn work_minutes(&self) -> u64 {
        self.work_minutes
    }

    /// Configured rest interval length in minutes.
    #[must_use]
    pub const fn rest_minutes(&self) -> u64 {
        self.rest_minutes
    }

    /// Snapshot for the end-of-session report.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            completed_work_intervals: self.completed_work_intervals(),
            work_minutes: self.work_minutes,
            rest_minutes: self.rest_minutes,
            started_at: self.started_at,
            ended_at: Local::now(),
        }
    }
}

/// Final report produced when the session ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Work intervals fully completed before the session ended.
    pub completed_work_intervals: u64,
    /// Configured work interval length in minutes.
    pub work_minutes: u64,
    /// Configured rest interval length in minutes.
    pub rest_minutes: u64,
    /// When the session started.
    pub started_at: DateTime<Local>,
    /// When the session ended.
    pub ended_at: DateTime<Local>,
}
