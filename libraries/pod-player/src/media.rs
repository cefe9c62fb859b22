//! Media playback handle abstraction
//!
//! Abstracts the native audio resource (an HTML audio element in the
//! browser, a simulated clock in tests and the CLI).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifies one mounted playback handle
///
/// Every episode change mounts a new handle with a fresh id. Events
/// carrying an older id belong to an abandoned handle and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u64);

/// Events a playback handle reports back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Playback position moved (periodic while playing, and after seeks)
    PositionChanged { seconds: f64 },

    /// Media reached its end (not emitted while looping)
    Ended,

    /// Playback started, possibly triggered outside the player
    Started,

    /// Playback paused, possibly triggered outside the player
    Paused,

    /// Source metadata is available
    MetadataLoaded { duration: f64 },

    /// Load or decode failure
    Error { message: String },
}

/// A loaded, controllable media source
///
/// Commands are fire-and-forget: their effect is observed later through
/// `MediaEvent`s, not awaited.
pub trait MediaHandle {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Move to `seconds` from the start
    fn set_position(&mut self, seconds: f64) -> Result<()>;

    /// Media length in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Native repeat flag; a looping handle restarts instead of ending
    fn set_looping(&mut self, looping: bool) -> Result<()>;
}

/// Factory for playback handles
pub trait MediaBackend {
    /// Load `url` into a new handle
    ///
    /// The handle must tag the events it emits with `id`.
    fn open(&mut self, url: &str, id: HandleId) -> Result<Box<dyn MediaHandle>>;
}
