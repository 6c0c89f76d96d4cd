//! Error types for the glyph generation pipeline

use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a generation batch
#[derive(Error, Debug)]
pub enum Error {
    /// The selection failed its invariant checks before the build phase
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A font file could not be loaded or parsed
    #[error("Failed to load font {path}: {reason}")]
    FontLoad { path: String, reason: String },

    /// Filesystem error while preparing output directories
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A canvas could not be encoded or written to its destination
    #[error("Could not write {path}: {cause}")]
    Export { path: String, cause: String },

    /// The worker pool refused a task or the completion channel broke
    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}
