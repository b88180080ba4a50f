//! Error types for pom.

use thiserror::Error;

/// All errors surfaced by the pom CLI.
#[derive(Debug, Error)]
pub enum PomError {
    /// Command-line arguments parsed but failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file exists but could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The Ctrl-C handler could not be installed.
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    /// The alert playback process could not be controlled.
    #[error("alert playback error: {0}")]
    Alert(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = PomError::InvalidArgument("work must be non-negative".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: work must be non-negative"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PomError = io.into();
        assert!(matches!(err, PomError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
