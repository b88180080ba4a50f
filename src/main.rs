use std::sync::mpsc::Sender;

use clap::Parser;
use colored::Colorize;

use pom::alert::ProcessAlertPlayer;
use pom::cancel::CancelToken;
use pom::cli::args::{Cli, OutputFormat, USAGE};
use pom::config::Config;
use pom::error::PomError;
use pom::session::driver::{AckEvent, SessionDriver, StdinAcknowledger};
use pom::session::runner::IntervalRunner;
use pom::session::SessionState;

fn main() {
    let cli = parse_args();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        if matches!(e, PomError::InvalidArgument(_)) {
            eprintln!("{USAGE}");
        }
        std::process::exit(1);
    }
}

/// Parse arguments, exiting 0 for help/version and 1 for bad usage.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap's rendered message already includes the usage line.
            let _ = e.print();
            std::process::exit(i32::from(e.use_stderr()));
        }
    }
}

fn run(cli: Cli) -> Result<(), PomError> {
    let (work_minutes, rest_minutes) = cli.durations()?;

    let config = Config::load()?;
    config.apply_color();

    println!("{}", "=== Pomodoro Timer [ctrl-C to quit] ===".bold());
    println!("\tWorking: {work_minutes} minute(s)");
    println!("\tResting: {rest_minutes} minute(s)");

    let cancel = CancelToken::new();
    let (acks, interrupts) = StdinAcknowledger::new(cancel.clone());
    install_interrupt_handler(&cancel, interrupts)?;

    let sound_path = match config.alert.sound_path {
        Some(path) => path,
        None => ProcessAlertPlayer::default_sound_path()?,
    };

    let session = SessionState::new(work_minutes, rest_minutes);
    let runner = IntervalRunner::new(cancel.clone());
    let player = ProcessAlertPlayer::new(sound_path);

    let mut driver = SessionDriver::new(session, runner, player, acks, cancel);
    let summary = driver.run();

    match cli.output {
        OutputFormat::Pretty => println!(
            "\nPomodoro session complete. ({} work interval(s) completed)",
            summary.completed_work_intervals
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Route Ctrl-C into the cancellation token and the acknowledgment channel,
/// so both suspension points unblock immediately.
fn install_interrupt_handler(
    cancel: &CancelToken,
    interrupts: Sender<AckEvent>,
) -> Result<(), PomError> {
    let cancel = cancel.clone();
    ctrlc::set_handler(move || {
        cancel.cancel();
        let _ = interrupts.send(AckEvent::Interrupt);
    })?;
    Ok(())
}
