//! Core types for the playback store

use serde::{Deserialize, Serialize};

/// A single playable podcast episode
///
/// Immutable value handed to the store by whatever lists episodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title
    pub title: String,

    /// Display label for the people on the episode
    pub members: String,

    /// Cover image URI
    pub thumbnail: String,

    /// Length in whole seconds
    pub duration: u64,

    /// Playable media URI
    pub url: String,
}

/// How `play_list` treats a start index past the end of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Refuse the call and leave the store untouched
    #[default]
    Reject,

    /// Start from the last episode instead
    Clamp,
}

/// Configuration for a playback store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Out-of-range handling for `play_list` (default: reject)
    pub index_policy: IndexPolicy,

    /// Initial loop flag (default: false)
    pub looping: bool,

    /// Initial shuffle flag (default: false)
    pub shuffling: bool,

    /// Seed for reproducible shuffle picks (default: thread RNG)
    pub shuffle_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::Reject,
            looping: false,
            shuffling: false,
            shuffle_seed: None,
        }
    }
}

/// Read-only copy of the store state
///
/// Handed to subscribers after every committed change and used by views
/// to detect what moved since their last pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub queue: Vec<Episode>,
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PlaybackSnapshot {
    /// Episode under the current index, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|index| self.queue.get(index))
    }
}
