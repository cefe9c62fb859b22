//! Error types for the playback store

use thiserror::Error;

/// Playback store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// An empty episode list was handed to `play_list`
    #[error("Queue is empty")]
    QueueEmpty,

    /// Start index does not address an episode in the list
    #[error("Index {index} out of bounds for queue of {len} episodes")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
