//! Alert playback backed by the system audio player.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::AlertPlayer;
use crate::error::PomError;

/// Program used to play the alert asset.
const PLAYER_PROGRAM: &str = "afplay";

/// Name of the alert asset, resolved next to the executable.
const DEFAULT_SOUND_FILE: &str = "alarm.wav";

/// Plays the alert by spawning an audio-playback process.
///
/// Holds at most one child process. `play` while a handle is held is a
/// no-op, and `stop` kills and reaps the child before releasing the handle.
/// Dropping the player stops playback, so the audio process cannot outlive
/// the session even when the loop unwinds on cancellation.
#[derive(Debug)]
pub struct ProcessAlertPlayer {
    program: PathBuf,
    sound_path: PathBuf,
    child: Option<Child>,
}

impl ProcessAlertPlayer {
    /// Player for the given sound file using the system audio player.
    #[must_use]
    pub fn new(sound_path: PathBuf) -> Self {
        Self {
            program: PathBuf::from(PLAYER_PROGRAM),
            sound_path,
            child: None,
        }
    }

    /// Resolve the default alert asset, `alarm.wav` next to the executable.
    ///
    /// # Errors
    ///
    /// Returns `PomError::Io` if the executable path cannot be determined.
    pub fn default_sound_path() -> Result<PathBuf, PomError> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(DEFAULT_SOUND_FILE))
    }

    /// Whether a playback process handle is currently held.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.child.is_some()
    }

    #[cfg(test)]
    fn with_program(program: &str, sound_path: PathBuf) -> Self {
        Self {
            program: PathBuf::from(program),
            sound_path,
            child: None,
        }
    }

    #[cfg(test)]
    fn child_id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }
}

impl AlertPlayer for ProcessAlertPlayer {
    fn play(&mut self) -> Result<(), PomError> {
        if self.child.is_some() {
            return Ok(());
        }

        let child = Command::new(&self.program)
            .arg(&self.sound_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                PomError::Alert(format!("failed to start {}: {e}", self.program.display()))
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PomError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match child.kill() {
            Ok(()) => {}
            // A child that already exited cannot be signalled again; it
            // counts as stopped.
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(PomError::Alert(format!("failed to stop playback: {e}"))),
        }

        child
            .wait()
            .map_err(|e| PomError::Alert(format!("failed to reap playback process: {e}")))?;
        Ok(())
    }
}

impl Drop for ProcessAlertPlayer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
