//! Framework-neutral render model
//!
//! Everything a front end needs to draw the player. Markup, styling and
//! icons are left to the consumer.

use crate::controls::TransportControls;
use crate::time::format_duration;
use serde::{Deserialize, Serialize};

/// Placeholder shown when nothing is queued
pub const EMPTY_MESSAGE: &str = "Select a podcast to listen to";

/// Header label above the episode card
pub const HEADER_LABEL: &str = "Now playing";

/// Upper card: the current episode or the empty state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NowPlaying {
    Episode {
        title: String,
        members: String,
        thumbnail: String,
    },
    Empty {
        message: String,
    },
}

/// Slider position and range in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderModel {
    pub value: u64,
    pub max: u64,
}

/// Progress row: elapsed label, slider, total label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubberModel {
    pub elapsed_label: String,
    pub total_label: String,

    /// `None` renders an inert empty track
    pub slider: Option<SliderModel>,
}

impl ScrubberModel {
    /// Scrubber for `progress` seconds into an episode of `duration`
    pub fn for_episode(progress: u64, duration: u64) -> Self {
        Self {
            elapsed_label: format_duration(progress),
            total_label: format_duration(duration),
            slider: Some(SliderModel {
                value: progress,
                max: duration,
            }),
        }
    }

    /// Scrubber with nothing loaded
    pub fn empty() -> Self {
        Self {
            elapsed_label: format_duration(0),
            total_label: format_duration(0),
            slider: None,
        }
    }
}

/// Complete player render state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRenderModel {
    pub header: String,
    pub now_playing: NowPlaying,
    pub scrubber: ScrubberModel,
    pub controls: TransportControls,

    /// Set when the current episode could not be played
    pub unplayable_reason: Option<String>,
}

impl PlayerRenderModel {
    /// True when the empty state is shown
    pub fn is_empty(&self) -> bool {
        matches!(self.now_playing, NowPlaying::Empty { .. })
    }
}
