//! Shared helpers for CLI integration tests

#![allow(dead_code)]

use pod_cli::{Command, Outcome, PlayerSettings, Session};
use pod_playback::Episode;

pub fn episode(n: usize, duration: u64) -> Episode {
    Episode {
        title: format!("Episode {}", n),
        members: format!("Host {}", n),
        thumbnail: format!("https://cdn.example.com/{}.jpg", n),
        duration,
        url: format!("https://cdn.example.com/{}.mp3", n),
    }
}

/// Three episodes of 100, 200 and 300 seconds
pub fn catalogue() -> Vec<Episode> {
    vec![episode(0, 100), episode(1, 200), episode(2, 300)]
}

pub fn session() -> Session {
    Session::new(&PlayerSettings::default(), catalogue()).unwrap()
}

/// Parse and execute, returning the printed text
pub fn run(session: &mut Session, line: &str) -> String {
    match session.execute(line.parse::<Command>().unwrap()).unwrap() {
        Outcome::Output(text) => text,
        Outcome::Quit => panic!("unexpected quit"),
    }
}
