//! Pod Player - Player View
//!
//! Binds a `pod_playback::PlaybackStore` to a media playback handle and
//! produces a framework-neutral render model.
//!
//! This crate provides:
//! - Handle lifecycle (one fresh handle per selected episode)
//! - Play/pause and loop synchronisation from store to handle
//! - Handle events mirrored back (progress, end of track, external pause)
//! - Immediate seek feedback
//! - Transport button enablement
//! - `HH:MM:SS` time labels
//!
//! Platform audio is plugged in through the `MediaBackend` / `MediaHandle`
//! traits. The `wasm` feature adds an `HTMLAudioElement` backend.
//!
//! # Example
//!
//! ```rust
//! use pod_player::{HandleId, MediaBackend, MediaHandle, PlayerView, ViewConfig};
//! use pod_playback::{Episode, PlaybackStore};
//!
//! struct Silent;
//!
//! impl MediaHandle for Silent {
//!     fn play(&mut self) -> pod_player::Result<()> { Ok(()) }
//!     fn pause(&mut self) -> pod_player::Result<()> { Ok(()) }
//!     fn position(&self) -> f64 { 0.0 }
//!     fn set_position(&mut self, _seconds: f64) -> pod_player::Result<()> { Ok(()) }
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_looping(&mut self, _looping: bool) -> pod_player::Result<()> { Ok(()) }
//! }
//!
//! struct SilentBackend;
//!
//! impl MediaBackend for SilentBackend {
//!     fn open(&mut self, _url: &str, _id: HandleId) -> pod_player::Result<Box<dyn MediaHandle>> {
//!         Ok(Box::new(Silent))
//!     }
//! }
//!
//! let mut store = PlaybackStore::default();
//! let mut view = PlayerView::new(ViewConfig::default(), Box::new(SilentBackend));
//!
//! store.play(Episode {
//!     title: "Pilot".to_string(),
//!     members: "Host".to_string(),
//!     thumbnail: "https://cdn.example.com/pilot.jpg".to_string(),
//!     duration: 1200,
//!     url: "https://cdn.example.com/pilot.mp3".to_string(),
//! });
//! view.sync(&mut store);
//!
//! view.handle_seek(90).unwrap();
//! let model = view.render(&store);
//! assert_eq!(model.scrubber.elapsed_label, "00:01:30");
//! ```

mod controls;
mod error;
mod media;
mod render;
mod time;
mod view;
pub mod wasm;

// Public exports
pub use controls::{ButtonState, TransportControls};
pub use error::{MediaError, Result};
pub use media::{HandleId, MediaBackend, MediaEvent, MediaHandle};
pub use render::{
    NowPlaying, PlayerRenderModel, ScrubberModel, SliderModel, EMPTY_MESSAGE, HEADER_LABEL,
};
pub use time::format_duration;
pub use view::{PlayerView, UnplayableEpisode, ViewConfig};
