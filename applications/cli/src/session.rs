//! Interactive session
//!
//! Owns the store, the view and the simulated clock. Every command is
//! followed by the effect pass and by delivering queued media events, so
//! the printed player always reflects settled state.

use crate::command::{Command, HELP};
use crate::config::PlayerSettings;
use crate::display;
use crate::error::{CliError, Result};
use crate::simulated::{simulated, SimulatedControl};
use pod_playback::{Episode, PlaybackStore};
use pod_player::{PlayerRenderModel, PlayerView};
use tracing::{debug, info};

/// What the host should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and keep reading
    Output(String),
    Quit,
}

pub struct Session {
    catalogue: Vec<Episode>,
    store: PlaybackStore,
    view: PlayerView,
    control: SimulatedControl,
    json: bool,
}

impl Session {
    /// Build a session over `catalogue`
    ///
    /// Every catalogue URL is playable in the simulated backend, with the
    /// episode's listed duration as its media length.
    pub fn new(settings: &PlayerSettings, catalogue: Vec<Episode>) -> Result<Self> {
        let durations = catalogue
            .iter()
            .map(|episode| (episode.url.clone(), episode.duration))
            .collect();
        let (backend, control) = simulated(durations);

        let mut session = Self {
            store: PlaybackStore::new(settings.store.clone()),
            view: PlayerView::new(settings.view.clone(), Box::new(backend)),
            catalogue,
            control,
            json: false,
        };

        if let Some(start) = settings.start_index {
            session.store.play_list(session.catalogue.clone(), start)?;
            session.settle();
        }

        info!(
            episodes = session.catalogue.len(),
            queued = session.store.queue_len(),
            "session ready"
        );
        Ok(session)
    }

    /// Print JSON instead of text after each command
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Run one command
    ///
    /// Store and media failures are returned as errors; the session stays
    /// usable afterwards.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "execute");

        match command {
            Command::List => {
                return Ok(Outcome::Output(display::render_catalogue(&self.catalogue)))
            }
            Command::Help => return Ok(Outcome::Output(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Show => return Ok(Outcome::Output(self.render_text())),
            Command::Json => return Ok(Outcome::Output(self.render_json()?)),

            Command::Play(n) => {
                let episode = self.catalogue_entry(n)?.clone();
                self.store.play(episode);
            }
            Command::Queue(n) => self.store.play_list(self.catalogue.clone(), n)?,
            Command::Next => self.store.play_next(),
            Command::Prev => self.store.play_prev(),
            Command::Toggle => self.store.toggle_play(),
            Command::Loop => self.store.toggle_looping(),
            Command::Shuffle => self.store.toggle_shuffle(),
            Command::Seek(secs) => {
                self.view.handle_seek(secs)?;
            }
            Command::Tick(secs) => self.control.tick(secs),
            Command::ExternalPause => self.control.external_pause(),
            Command::ExternalResume => self.control.external_resume(),
            Command::Fail(n) => {
                let url = self.catalogue_entry(n)?.url.clone();
                self.control.break_source(&url);
            }
            Command::Crash => self.control.fail_active("simulated decode error"),
            Command::Retry => {
                if let Some(episode) = self.store.current_episode() {
                    self.control.repair_source(&episode.url);
                }
                self.view.retry();
            }
        }

        self.settle();

        let output = if self.json {
            self.render_json()?
        } else {
            self.render_text()
        };
        Ok(Outcome::Output(output))
    }

    /// Effect pass, then deliver media events until none are left
    fn settle(&mut self) {
        self.view.sync(&mut self.store);
        while let Some((id, event)) = self.control.next_event() {
            self.view.handle_media_event(id, event, &mut self.store);
        }

        for event in self.store.drain_events() {
            debug!(?event, "store event");
        }
    }

    fn catalogue_entry(&self, n: usize) -> Result<&Episode> {
        self.catalogue.get(n).ok_or_else(|| {
            CliError::Command(format!(
                "no episode {} (catalogue has {})",
                n,
                self.catalogue.len()
            ))
        })
    }

    pub fn render(&self) -> PlayerRenderModel {
        self.view.render(&self.store)
    }

    pub fn render_text(&self) -> String {
        display::render_text(&self.render())
    }

    /// Render model and store snapshot as one JSON document
    pub fn render_json(&self) -> Result<String> {
        let document = serde_json::json!({
            "player": self.render(),
            "store": self.store.snapshot(),
        });
        serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::Command(format!("json output failed: {}", e)))
    }

    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    pub fn catalogue(&self) -> &[Episode] {
        &self.catalogue
    }
}
