//! Transport control state
//!
//! Enablement and highlight for each button, derived from the store.

use pod_playback::PlaybackSnapshot;
use serde::{Deserialize, Serialize};

/// State of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonState {
    /// Whether the button accepts clicks
    pub enabled: bool,

    /// Whether the button is highlighted (toggle on)
    pub active: bool,
}

impl ButtonState {
    fn enabled_if(enabled: bool) -> Self {
        Self {
            enabled,
            active: false,
        }
    }
}

/// Shuffle, previous, play/pause, next and loop buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransportControls {
    pub shuffle: ButtonState,
    pub previous: ButtonState,
    pub play: ButtonState,
    pub next: ButtonState,
    pub repeat: ButtonState,

    /// Show the pause glyph instead of play
    pub show_pause: bool,
}

impl TransportControls {
    /// Derive button state from a store snapshot
    ///
    /// With no episode selected every button is disabled.
    pub fn from_snapshot(snapshot: &PlaybackSnapshot) -> Self {
        let has_episode = snapshot.current_episode().is_some();

        Self {
            shuffle: ButtonState {
                enabled: has_episode && snapshot.queue.len() != 1,
                active: snapshot.is_shuffling,
            },
            previous: ButtonState::enabled_if(has_episode && snapshot.has_previous),
            play: ButtonState::enabled_if(has_episode),
            next: ButtonState::enabled_if(has_episode && snapshot.has_next),
            repeat: ButtonState {
                enabled: has_episode,
                active: snapshot.is_looping,
            },
            show_pause: snapshot.is_playing,
        }
    }

    /// Every button, in display order
    pub fn buttons(&self) -> [(&'static str, ButtonState); 5] {
        [
            ("shuffle", self.shuffle),
            ("previous", self.previous),
            ("play", self.play),
            ("next", self.next),
            ("repeat", self.repeat),
        ]
    }
}
