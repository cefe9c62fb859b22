//! Pod Player - Playback State
//!
//! Framework-independent playback store for the Pod Player widget.
//!
//! This crate provides:
//! - Episode queue (replaced wholesale by `play` / `play_list`)
//! - Sequential next/previous navigation without wrap-around
//! - Shuffle (random pick on "next", repeats allowed)
//! - Loop flag (honoured by the media handle, stored here)
//! - Action dispatch with subscriber callbacks and a polled event queue
//!
//! # Architecture
//!
//! `pod-playback` does no I/O and knows nothing about audio output or UI
//! rendering. A view layer (see `pod-player`) observes the store and drives
//! the actual media handle.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use pod_playback::{Episode, PlaybackStore, StoreConfig};
//!
//! let mut store = PlaybackStore::new(StoreConfig::default());
//!
//! let episode = Episode {
//!     title: "Why Rust?".to_string(),
//!     members: "Ana, Bruno".to_string(),
//!     thumbnail: "https://cdn.example.com/1.jpg".to_string(),
//!     duration: 2400,
//!     url: "https://cdn.example.com/1.mp3".to_string(),
//! };
//!
//! store.play(episode.clone());
//! assert_eq!(store.current_episode(), Some(&episode));
//! assert!(store.is_playing());
//! ```
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use pod_playback::{Episode, PlaybackStore};
//!
//! # fn ep(n: u64) -> Episode {
//! #     Episode {
//! #         title: format!("#{}", n),
//! #         members: String::new(),
//! #         thumbnail: String::new(),
//! #         duration: 60,
//! #         url: format!("https://cdn.example.com/{}.mp3", n),
//! #     }
//! # }
//! let mut store = PlaybackStore::default();
//! store.play_list(vec![ep(0), ep(1), ep(2)], 1).unwrap();
//!
//! store.play_next();
//! assert_eq!(store.current_index(), Some(2));
//!
//! // Last episode: no wrap
//! store.play_next();
//! assert_eq!(store.current_index(), Some(2));
//! ```
//!
//! # Example: Observing Changes
//!
//! ```rust
//! use pod_playback::{PlaybackStore, StoreEvent};
//!
//! let mut store = PlaybackStore::default();
//! store.subscribe(|event, snapshot| {
//!     if let StoreEvent::PlayingChanged { playing } = event {
//!         println!("playing={} at {:?}", playing, snapshot.current_index);
//!     }
//! });
//! ```

mod error;
mod events;
mod queue;
mod shuffle;
mod store;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{PlayerAction, StoreEvent};
pub use shuffle::{IndexPicker, SeededPicker, ThreadRngPicker};
pub use store::{PlaybackStore, SubscriptionId};
pub use types::{Episode, IndexPolicy, PlaybackSnapshot, StoreConfig};
