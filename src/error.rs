//! Error types for muxfile.
//!
//! Fatal problems (missing config, unreadable files, bad settings) and tmux
//! invocation failures are represented by [`MuxfileError`]. Per-window
//! reconciliation failures are not errors; they are reported as
//! [`crate::reconcile::Outcome::Failed`].

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in muxfile.
#[derive(Error, Debug)]
pub enum MuxfileError {
    /// Config file does not exist at the given path.
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Could not determine the user's config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Failed to read a file from disk.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has the wrong shape.
    #[error("Failed to parse settings {path}: {source}")]
    Settings {
        /// Settings file that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A tmux command could not be spawned or returned unusable output.
    #[error("Tmux error: {0}")]
    TmuxError(String),
}

/// Convenient Result type alias for muxfile operations.
pub type Result<T> = std::result::Result<T, MuxfileError>;
