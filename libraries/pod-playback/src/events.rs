//! Store actions and change events
//!
//! Every intent is expressed as a `PlayerAction` and goes through
//! `PlaybackStore::dispatch`. Each committed change produces `StoreEvent`s:
//! - Queue replaced (`play`, `play_list`)
//! - Selection moved (`play_next`, `play_prev`)
//! - Flag flips (playing, looping, shuffling)
//!
//! Intents that change nothing produce no events.

use crate::types::Episode;
use serde::{Deserialize, Serialize};

/// Intents accepted by the playback store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Replace the queue with one episode and start it
    Play { episode: Episode },

    /// Replace the queue with a list and start at `index`
    PlayList { episodes: Vec<Episode>, index: usize },

    /// Advance (or pick randomly when shuffling)
    PlayNext,

    /// Step back one episode
    PlayPrev,

    /// Flip play/pause
    TogglePlay,

    /// Set play/pause directly, used to mirror the media handle
    SetPlayingState { playing: bool },

    /// Flip the loop flag
    ToggleLooping,

    /// Flip the shuffle flag
    ToggleShuffle,
}

/// Events emitted after a change has been committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// Queue swapped out wholesale
    QueueReplaced {
        /// New queue length
        length: usize,
        /// Starting position
        index: usize,
    },

    /// Current index moved within the same queue
    SelectionChanged {
        /// Previous position
        from: usize,
        /// New position
        to: usize,
    },

    /// Play/pause state changed
    PlayingChanged { playing: bool },

    /// Loop flag changed
    LoopingChanged { looping: bool },

    /// Shuffle flag changed
    ShuffleChanged { shuffling: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_json_shape() {
        let json = serde_json::to_string(&PlayerAction::SetPlayingState { playing: true }).unwrap();
        assert_eq!(json, r#"{"type":"set_playing_state","playing":true}"#);

        let back: PlayerAction = serde_json::from_str(r#"{"type":"play_next"}"#).unwrap();
        assert_eq!(back, PlayerAction::PlayNext);
    }

    #[test]
    fn event_json_shape() {
        let json = serde_json::to_string(&StoreEvent::SelectionChanged { from: 0, to: 1 }).unwrap();
        assert_eq!(json, r#"{"type":"selection_changed","from":0,"to":1}"#);
    }
}
