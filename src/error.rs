//! Error types for git-glance
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for git-glance
#[derive(Error, Debug)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository access errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Invalid reference: {0}")]
    InvalidRef(String),

    #[error("Git operation failed: {0}")]
    Libgit2(String),
}

impl From<git2::Error> for GitError {
    fn from(e: git2::Error) -> Self {
        GitError::Libgit2(e.message().to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// Render-time errors originating from the display sink
///
/// A failure aborts the remainder of the current draw pass; rows already
/// drawn remain on screen and no retry is attempted.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Row {row} out of range for window with {rows} rows")]
    RowOutOfRange { row: u16, rows: u16 },

    #[error("Window too small: {rows}x{cols}")]
    WindowTooSmall { rows: u16, cols: u16 },

    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Drawing backend error: {0}")]
    Backend(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
