//! Browser bindings for pod-player
//!
//! Provides a `MediaBackend` over `HTMLAudioElement`, so the view can
//! drive real audio in a web page.

#[cfg(feature = "wasm")]
pub mod audio;

#[cfg(feature = "wasm")]
pub use audio::{EventSink, HtmlAudioBackend};
