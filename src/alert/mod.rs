//! Audible alerts for interval completion.
//!
//! The session driver depends only on the two-method `AlertPlayer`
//! interface; the production implementation spawns an OS audio-playback
//! process on a fixed sound asset.

mod process;

pub use process::ProcessAlertPlayer;

use crate::error::PomError;

/// A playable alert with single-process ownership semantics.
#[cfg_attr(test, mockall::automock)]
pub trait AlertPlayer {
    /// Begin the audible alert.
    ///
    /// Calling `play` while the alert is already playing is a no-op; at most
    /// one playback process exists at a time.
    ///
    /// # Errors
    ///
    /// Returns `PomError::Alert` if the playback process cannot be started.
    fn play(&mut self) -> Result<(), PomError>;

    /// Stop the alert if it is playing.
    ///
    /// Stopping an idle player, including one that was never played, is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `PomError::Alert` if the playback process cannot be
    /// terminated.
    fn stop(&mut self) -> Result<(), PomError>;
}
