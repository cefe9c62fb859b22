//! CLI error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read episodes from {path}: {reason}")]
    Episodes { path: String, reason: String },

    #[error("Invalid command: {0}")]
    Command(String),

    #[error(transparent)]
    Playback(#[from] pod_playback::PlaybackError),

    #[error(transparent)]
    Media(#[from] pod_player::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
