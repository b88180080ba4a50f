//! pom - a command-line Pomodoro interval timer
//!
//! This crate alternates timed work and rest intervals, prompting the user
//! before each interval and playing an audible alert when one completes.
//! The session runs until interrupted with Ctrl-C and then reports how many
//! work intervals were completed.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;

pub use cli::args::{Cli, OutputFormat};
pub use error::PomError;
