use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("No changelog found at {}", path.display())]
    DoesNotExist { path: PathBuf },

    #[error("Changelog already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changelog-cli
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a missing-file error for the given path
    pub fn does_not_exist(path: impl Into<PathBuf>) -> Self {
        ChangelogError::DoesNotExist { path: path.into() }
    }

    /// Create an already-exists error for the given path
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        ChangelogError::AlreadyExists { path: path.into() }
    }

    /// Create an entry validation error with context
    pub fn invalid_entry(msg: impl Into<String>) -> Self {
        ChangelogError::InvalidEntry(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangelogError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// True when the changelog file is missing, which the CLI recovers from
    pub fn is_missing_changelog(&self) -> bool {
        matches!(self, ChangelogError::DoesNotExist { .. })
    }
}
