//! Pod Player - terminal host
//!
//! Wires a `PlaybackStore` and a `PlayerView` to a simulated audio backend
//! and drives them from line commands. Useful for exercising the player
//! without a browser.

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod simulated;

pub use command::Command;
pub use config::PlayerSettings;
pub use error::{CliError, Result};
pub use session::{Outcome, Session};

use pod_playback::Episode;
use std::path::Path;

/// Read a JSON array of episodes
pub fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::Episodes {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&raw).map_err(|e| CliError::Episodes {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Built-in catalogue used when no episode file is configured
pub fn demo_episodes() -> Vec<Episode> {
    let episode = |slug: &str, title: &str, members: &str, duration: u64| Episode {
        title: title.to_string(),
        members: members.to_string(),
        thumbnail: format!("https://cdn.podplay.dev/{}.jpg", slug),
        duration,
        url: format!("https://cdn.podplay.dev/{}.mp3", slug),
    };

    vec![
        episode(
            "borrow-checker",
            "Living with the borrow checker",
            "Ana Lima, Bruno Costa",
            2712,
        ),
        episode(
            "async-in-practice",
            "Async in practice",
            "Carla Mendes, Diego Rocha",
            3485,
        ),
        episode(
            "shipping-wasm",
            "Shipping WebAssembly to production",
            "Ana Lima, Eva Souza",
            1980,
        ),
        episode(
            "error-handling",
            "Errors as values",
            "Bruno Costa",
            1544,
        ),
    ]
}
