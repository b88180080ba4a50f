//! Configuration management for pom.
//!
//! This module handles loading configuration from `~/.pom/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{AlertConfig, ColorSetting, Config, GeneralConfig};
