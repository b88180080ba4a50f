//! The interactive session loop.
//!
//! Drives the AwaitStart -> Running -> Advance -> Alerting cycle against the
//! interval runner, the alert player, and the acknowledgment source. The
//! loop has no terminal state of its own; it ends only when the session is
//! cancelled, and then reports the final state.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use colored::Colorize;

use crate::alert::AlertPlayer;
use crate::cancel::CancelToken;
use crate::error::PomError;
use crate::session::runner::{IntervalOutcome, IntervalRunner};
use crate::session::{SessionState, SessionSummary};

/// Result of waiting for a user acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// A line arrived; its content is ignored.
    Acknowledged,
    /// The session was cancelled while waiting.
    Cancelled,
}

/// Source of user acknowledgments. Seam between the driver and stdin.
pub trait Acknowledger {
    /// Block until the user acknowledges or the session is cancelled.
    fn wait(&mut self) -> AckOutcome;
}

/// Events delivered to a pending acknowledgment wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckEvent {
    /// A line arrived on stdin.
    Line,
    /// The interrupt handler fired.
    Interrupt,
    /// Stdin reached end of file; no further acknowledgment can arrive.
    Eof,
}

/// Acknowledgments read from stdin by a dedicated reader thread.
///
/// The interrupt handler shares the event channel, so a blocked wait
/// unblocks the moment the session is cancelled instead of after the next
/// line. Lines typed early stay buffered and satisfy the next wait, matching
/// plain line-buffered terminal input.
pub struct StdinAcknowledger {
    events: Receiver<AckEvent>,
    cancel: CancelToken,
}

impl StdinAcknowledger {
    /// Spawn the reader thread and return the acknowledger together with the
    /// sender the interrupt handler should fire `AckEvent::Interrupt` on.
    #[must_use]
    pub fn new(cancel: CancelToken) -> (Self, Sender<AckEvent>) {
        let (tx, rx) = mpsc::channel();

        let reader_tx = tx.clone();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() {
                    break;
                }
                if reader_tx.send(AckEvent::Line).is_err() {
                    return;
                }
            }
            let _ = reader_tx.send(AckEvent::Eof);
        });

        (Self { events: rx, cancel }, tx)
    }
}

impl Acknowledger for StdinAcknowledger {
    fn wait(&mut self) -> AckOutcome {
        if self.cancel.is_cancelled() {
            return AckOutcome::Cancelled;
        }

        match self.events.recv() {
            Ok(AckEvent::Line) => AckOutcome::Acknowledged,
            // EOF means the session can never progress again; fold it into
            // the cancellation path so the summary still prints.
            Ok(AckEvent::Interrupt | AckEvent::Eof) | Err(_) => {
                self.cancel.cancel();
                AckOutcome::Cancelled
            }
        }
    }
}

/// Drives the session state machine until cancellation.
pub struct SessionDriver<A, P> {
    session: SessionState,
    runner: IntervalRunner,
    alert: P,
    acks: A,
    cancel: CancelToken,
}

impl<A: Acknowledger, P: AlertPlayer> SessionDriver<A, P> {
    /// Assemble a driver over the given collaborators.
    pub fn new(
        session: SessionState,
        runner: IntervalRunner,
        alert: P,
        acks: A,
        cancel: CancelToken,
    ) -> Self {
        Self {
            session,
            runner,
            alert,
            acks,
            cancel,
        }
    }

    /// Run the loop until the session is cancelled, returning the final
    /// summary.
    ///
    /// Alert failures are reported as warnings and never abort the loop.
    /// Any active alert is stopped before returning, including when the
    /// loop unwinds on cancellation.
    pub fn run(&mut self) -> SessionSummary {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let kind = self.session.current_interval_kind();
            let minutes = self.session.current_interval_minutes();

            prompt(&format!("Start {kind} interval for {minutes}m? [press enter] "));
            if self.acks.wait() == AckOutcome::Cancelled {
                break;
            }

            #[allow(clippy::cast_precision_loss)]
            let outcome = self.runner.run(minutes as f64, |report| println!("{report}"));
            if outcome == IntervalOutcome::Cancelled {
                break;
            }

            self.session.advance();
            println!("\tInterval complete!");

            if let Err(e) = self.alert.play() {
                warn(&e);
            }
            prompt("continue [press enter] ");
            let ack = self.acks.wait();
            if let Err(e) = self.alert.stop() {
                warn(&e);
            }
            if ack == AckOutcome::Cancelled {
                break;
            }
        }

        // The audio process must not outlive the session.
        if let Err(e) = self.alert.stop() {
            warn(&e);
        }

        self.session.summary()
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

fn warn(err: &PomError) {
    eprintln!("{}: {err}", "warning".yellow().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockAlertPlayer;
    use std::time::Duration;

    /// Replays a fixed acknowledgment script, then reports cancellation.
    struct ScriptedAcks {
        script: std::vec::IntoIter<AckOutcome>,
    }

    impl ScriptedAcks {
        fn new(script: Vec<AckOutcome>) -> Self {
            Self {
                script: script.into_iter(),
            }
        }
    }

    impl Acknowledger for ScriptedAcks {
        fn wait(&mut self) -> AckOutcome {
            self.script.next().unwrap_or(AckOutcome::Cancelled)
        }
    }

    fn driver_with(
        script: Vec<AckOutcome>,
        alert: MockAlertPlayer,
        cancel: CancelToken,
    ) -> SessionDriver<ScriptedAcks, MockAlertPlayer> {
        let session = SessionState::new(0, 0);
        let runner = IntervalRunner::with_poll_period(cancel.clone(), Duration::from_millis(5));
        SessionDriver::new(session, runner, alert, ScriptedAcks::new(script), cancel)
    }

    #[test]
    fn test_full_work_and_rest_cycle_then_cancellation() {
        let mut alert = MockAlertPlayer::new();
        // One play/stop pair per completed interval, plus the final
        // stop-on-unwind.
        alert.expect_play().times(2).returning(|| Ok(()));
        alert.expect_stop().times(3).returning(|| Ok(()));

        let script = vec![
            AckOutcome::Acknowledged, // start work
            AckOutcome::Acknowledged, // continue after work
            AckOutcome::Acknowledged, // start rest
            AckOutcome::Cancelled,    // interrupted at the continue prompt
        ];

        let mut driver = driver_with(script, alert, CancelToken::new());
        let summary = driver.run();

        // Work and rest both completed: position 3, one work interval done.
        assert_eq!(summary.completed_work_intervals, 1);
    }

    #[test]
    fn test_cancellation_before_first_acknowledgment() {
        let mut alert = MockAlertPlayer::new();
        alert.expect_play().times(0);
        alert.expect_stop().times(1).returning(|| Ok(()));

        let mut driver = driver_with(vec![AckOutcome::Cancelled], alert, CancelToken::new());
        let summary = driver.run();

        assert_eq!(summary.completed_work_intervals, 0);
    }

    #[test]
    fn test_pre_cancelled_session_never_prompts() {
        let mut alert = MockAlertPlayer::new();
        alert.expect_play().times(0);
        alert.expect_stop().times(1).returning(|| Ok(()));

        let cancel = CancelToken::new();
        cancel.cancel();

        let mut driver = driver_with(Vec::new(), alert, cancel);
        let summary = driver.run();

        assert_eq!(summary.completed_work_intervals, 0);
    }

    #[test]
    fn test_alert_failure_does_not_abort_the_loop() {
        let mut alert = MockAlertPlayer::new();
        alert
            .expect_play()
            .times(1)
            .returning(|| Err(PomError::Alert("no audio device".to_string())));
        alert.expect_stop().times(2).returning(|| Ok(()));

        let script = vec![
            AckOutcome::Acknowledged, // start work
            AckOutcome::Cancelled,    // interrupted at the continue prompt
        ];

        let mut driver = driver_with(script, alert, CancelToken::new());
        let summary = driver.run();

        // The work interval still completed and was counted.
        assert_eq!(summary.completed_work_intervals, 1);
    }

    #[test]
    fn test_cancellation_during_interval_skips_advance_and_alert() {
        let mut alert = MockAlertPlayer::new();
        alert.expect_play().times(0);
        alert.expect_stop().times(1).returning(|| Ok(()));

        let cancel = CancelToken::new();
        let session = SessionState::new(60, 60);
        let runner = IntervalRunner::with_poll_period(cancel.clone(), Duration::from_secs(30));

        let canceller = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            canceller.cancel();
        });

        let script = vec![AckOutcome::Acknowledged];
        let mut driver =
            SessionDriver::new(session, runner, alert, ScriptedAcks::new(script), cancel);
        let summary = driver.run();
        handle.join().unwrap();

        // The 60 minute work interval was interrupted, so nothing completed.
        assert_eq!(summary.completed_work_intervals, 0);
    }
}
