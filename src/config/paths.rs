//! Path resolution for the pom configuration file.
//!
//! All pom configuration lives in `~/.pom/`:
//! - `config.yaml` - Main configuration file

use std::path::PathBuf;

use crate::error::PomError;

/// Paths to pom configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pom/`
    pub root: PathBuf,
    /// Config file: `~/.pom/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomError> {
        let home = std::env::var("HOME")
            .map_err(|_| PomError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".pom")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-pom");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
    }
}
