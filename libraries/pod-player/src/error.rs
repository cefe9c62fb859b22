//! Error types for the media bridge

use thiserror::Error;

/// Failures reported by a media backend or handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Source could not be opened or loaded
    #[error("Failed to load {url}: {reason}")]
    Load { url: String, reason: String },

    /// Play/pause command refused or playback broke mid-stream
    #[error("Playback error: {0}")]
    Playback(String),

    /// Position could not be changed
    #[error("Seek error: {0}")]
    Seek(String),

    /// Backend does not support the operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type for media operations
pub type Result<T> = std::result::Result<T, MediaError>;
