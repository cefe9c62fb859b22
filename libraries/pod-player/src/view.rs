//! Player view - binds the store to a media handle
//!
//! The view owns the only side-effecting resource in the player: the
//! playback handle for the current episode. It never mutates queue state
//! on its own; it mirrors handle events into the store through the store's
//! intents.
//!
//! Call order expected from the host:
//! 1. Dispatch intents on the store
//! 2. `sync` (the effect pass: mount handles, push play/pause/loop)
//! 3. `render` for display
//!
//! Handle events go through `handle_media_event`, which runs `sync` itself.

use crate::{
    controls::TransportControls,
    error::{MediaError, Result},
    media::{HandleId, MediaBackend, MediaEvent, MediaHandle},
    render::{NowPlaying, PlayerRenderModel, ScrubberModel, EMPTY_MESSAGE, HEADER_LABEL},
};
use pod_playback::{Episode, PlaybackStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// View configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Start every newly mounted episode immediately (default: true)
    ///
    /// When off, a new handle only plays if the store is already playing.
    pub autoplay: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { autoplay: true }
    }
}

/// An episode whose handle failed to load or play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplayableEpisode {
    /// Queue position at the time of failure
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// Handle mounted for one queue position
struct Mounted {
    id: HandleId,
    index: usize,
    episode: Episode,
    handle: Box<dyn MediaHandle>,

    /// Length reported by the media itself
    media_duration: Option<f64>,
}

/// Last play/loop values pushed to the handle
#[derive(Debug, Default, Clone, Copy)]
struct Applied {
    playing: bool,
    looping: bool,
}

/// Player view
pub struct PlayerView {
    config: ViewConfig,
    backend: Box<dyn MediaBackend>,
    mounted: Option<Mounted>,
    next_handle: u64,

    // Whole seconds elapsed in the mounted episode
    progress: u64,

    applied: Applied,
    unplayable: Option<UnplayableEpisode>,

    // Store queue generation the failure belongs to
    failed_generation: u64,
}

impl PlayerView {
    /// Create a view that opens handles through `backend`
    pub fn new(config: ViewConfig, backend: Box<dyn MediaBackend>) -> Self {
        Self {
            config,
            backend,
            mounted: None,
            next_handle: 0,
            progress: 0,
            applied: Applied::default(),
            unplayable: None,
            failed_generation: 0,
        }
    }

    // ===== Effect Pass =====

    /// React to the committed store state
    ///
    /// Mounts a fresh handle when the selected episode changed, releases it
    /// when the queue emptied, and pushes play/pause and loop changes that
    /// the handle has not seen yet.
    pub fn sync(&mut self, store: &mut PlaybackStore) {
        let Some((index, episode)) = store.current_index().zip(store.current_episode().cloned())
        else {
            self.release();
            return;
        };

        if self.is_unplayable(index, &episode.url, store.queue_generation()) {
            // Nothing to play; keep the store from claiming otherwise
            store.set_playing_state(false);
            self.applied.playing = false;
            return;
        }

        if !self.is_mounted(index, &episode.url) {
            let url = episode.url.clone();
            if let Err(err) = self.mount(index, episode, store) {
                self.fail(index, url, &err, store);
                return;
            }
        }

        if let Err(err) = self.apply_effects(store) {
            self.fail_mounted(&err, store);
        }
    }

    fn mount(&mut self, index: usize, episode: Episode, store: &mut PlaybackStore) -> Result<()> {
        // Abandon the previous handle before loading the next one
        self.mounted = None;
        self.unplayable = None;
        self.progress = 0;

        let id = HandleId(self.next_handle);
        self.next_handle += 1;
        debug!(handle = id.0, index, url = %episode.url, "mounting playback handle");

        let mut handle = self.backend.open(&episode.url, id)?;

        let looping = store.is_looping();
        handle.set_looping(looping)?;
        handle.set_position(0.0)?;

        let playing = self.config.autoplay || store.is_playing();
        if playing {
            handle.play()?;
        }

        self.mounted = Some(Mounted {
            id,
            index,
            episode,
            handle,
            media_duration: None,
        });
        self.applied = Applied { playing, looping };
        store.set_playing_state(playing);

        Ok(())
    }

    fn apply_effects(&mut self, store: &PlaybackStore) -> Result<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(());
        };

        let looping = store.is_looping();
        if looping != self.applied.looping {
            mounted.handle.set_looping(looping)?;
            self.applied.looping = looping;
        }

        let playing = store.is_playing();
        if playing != self.applied.playing {
            if playing {
                mounted.handle.play()?;
            } else {
                mounted.handle.pause()?;
            }
            self.applied.playing = playing;
        }

        Ok(())
    }

    fn release(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            debug!(handle = mounted.id.0, "queue empty, releasing playback handle");
        }
        self.progress = 0;
        self.applied = Applied::default();
        self.unplayable = None;
    }

    // ===== User Input =====

    /// Seek to `amount` seconds
    ///
    /// The target is clamped to the episode duration, or to the media's own
    /// length once metadata reported a shorter one, and mirrored into
    /// progress right away without waiting for the handle to report back.
    /// Returns the applied position.
    pub fn handle_seek(&mut self, amount: u64) -> Result<u64> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Err(MediaError::Unsupported("no episode loaded".to_string()));
        };

        let limit = mounted
            .media_duration
            .filter(|media| media.is_finite() && *media > 0.0)
            .map_or(mounted.episode.duration, |media| {
                whole_seconds(media, mounted.episode.duration)
            });
        let target = amount.min(limit);
        mounted.handle.set_position(target as f64)?;
        self.progress = target;
        trace!(target, "seek");

        Ok(target)
    }

    /// Forget a load failure so the next `sync` tries the episode again
    pub fn retry(&mut self) {
        if let Some(unplayable) = self.unplayable.take() {
            debug!(url = %unplayable.url, "retrying unplayable episode");
        }
    }

    // ===== Handle Events =====

    /// Process an event from the handle identified by `id`
    ///
    /// Events from handles that are no longer mounted are ignored. Failures
    /// mark the episode unplayable instead of propagating.
    pub fn handle_media_event(
        &mut self,
        id: HandleId,
        event: MediaEvent,
        store: &mut PlaybackStore,
    ) {
        if self.handle_id() != Some(id) {
            trace!(handle = id.0, ?event, "dropping event from stale handle");
            return;
        }

        let result = match event {
            MediaEvent::PositionChanged { seconds } => {
                self.on_position(seconds);
                Ok(())
            }
            MediaEvent::MetadataLoaded { duration } => self.on_metadata(duration),
            MediaEvent::Ended => self.on_ended(store),
            MediaEvent::Started => {
                self.mirror_playing(true, store);
                Ok(())
            }
            MediaEvent::Paused => {
                self.mirror_playing(false, store);
                Ok(())
            }
            MediaEvent::Error { message } => Err(MediaError::Playback(message)),
        };

        if let Err(err) = result {
            self.fail_mounted(&err, store);
        }

        self.sync(store);
    }

    fn on_position(&mut self, seconds: f64) {
        if let Some(mounted) = self.mounted.as_ref() {
            self.progress = whole_seconds(seconds, mounted.episode.duration);
        }
    }

    fn on_metadata(&mut self, duration: f64) -> Result<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(());
        };

        mounted.media_duration = Some(duration);
        mounted.handle.set_position(0.0)?;
        self.progress = 0;
        Ok(())
    }

    fn on_ended(&mut self, store: &mut PlaybackStore) -> Result<()> {
        let before = store.current_index();
        store.play_next();

        if store.current_index() != before {
            // New episode selected; sync mounts it
            return Ok(());
        }

        if store.is_shuffling() {
            // Shuffle picked the same episode again
            if let Some(mounted) = self.mounted.as_mut() {
                mounted.handle.set_position(0.0)?;
                mounted.handle.play()?;
            }
            self.progress = 0;
            self.applied.playing = true;
            store.set_playing_state(true);
        } else {
            debug!("end of queue reached");
            self.applied.playing = false;
            store.set_playing_state(false);
        }

        Ok(())
    }

    /// Mirror a play/pause that the handle already performed
    ///
    /// Recorded as applied so the next `sync` does not echo it back.
    fn mirror_playing(&mut self, playing: bool, store: &mut PlaybackStore) {
        store.set_playing_state(playing);
        self.applied.playing = store.is_playing();
    }

    // ===== Failure Handling =====

    fn fail_mounted(&mut self, err: &MediaError, store: &mut PlaybackStore) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        let (index, url) = (mounted.index, mounted.episode.url.clone());
        self.fail(index, url, err, store);
    }

    fn fail(&mut self, index: usize, url: String, err: &MediaError, store: &mut PlaybackStore) {
        warn!(index, url = %url, error = %err, "episode unplayable");

        self.mounted = None;
        self.unplayable = Some(UnplayableEpisode {
            index,
            url,
            reason: err.to_string(),
        });
        self.failed_generation = store.queue_generation();
        self.applied.playing = false;
        store.set_playing_state(false);
    }

    fn is_mounted(&self, index: usize, url: &str) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.index == index && m.episode.url == url)
    }

    /// A failure only sticks to the queue it happened in; asking for the
    /// same episode again through `play`/`play_list` reopens it
    fn is_unplayable(&self, index: usize, url: &str, generation: u64) -> bool {
        self.failed_generation == generation
            && self
                .unplayable
                .as_ref()
                .is_some_and(|u| u.index == index && u.url == url)
    }

    // ===== Rendering =====

    /// Build the render model for the current store state
    pub fn render(&self, store: &PlaybackStore) -> PlayerRenderModel {
        let snapshot = store.snapshot();
        let controls = TransportControls::from_snapshot(&snapshot);

        let (now_playing, scrubber, unplayable_reason) = match snapshot.current_episode() {
            Some(episode) => (
                NowPlaying::Episode {
                    title: episode.title.clone(),
                    members: episode.members.clone(),
                    thumbnail: episode.thumbnail.clone(),
                },
                ScrubberModel::for_episode(self.progress.min(episode.duration), episode.duration),
                snapshot
                    .current_index
                    .filter(|&index| {
                        self.is_unplayable(index, &episode.url, store.queue_generation())
                    })
                    .and_then(|_| self.unplayable.as_ref())
                    .map(|u| u.reason.clone()),
            ),
            None => (
                NowPlaying::Empty {
                    message: EMPTY_MESSAGE.to_string(),
                },
                ScrubberModel::empty(),
                None,
            ),
        };

        PlayerRenderModel {
            header: HEADER_LABEL.to_string(),
            now_playing,
            scrubber,
            controls,
            unplayable_reason,
        }
    }

    // ===== State Queries =====

    /// Whole seconds elapsed in the current episode
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Id of the mounted handle, if any
    pub fn handle_id(&self) -> Option<HandleId> {
        self.mounted.as_ref().map(|m| m.id)
    }

    /// Length reported by the media once its metadata loaded
    pub fn media_duration(&self) -> Option<f64> {
        self.mounted.as_ref().and_then(|m| m.media_duration)
    }

    /// Live position straight from the handle
    pub fn handle_position(&self) -> Option<f64> {
        self.mounted.as_ref().map(|m| m.handle.position())
    }

    /// Last load/playback failure for the selected episode
    pub fn unplayable(&self) -> Option<&UnplayableEpisode> {
        self.unplayable.as_ref()
    }

}

impl std::fmt::Debug for PlayerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerView")
            .field("config", &self.config)
            .field("handle", &self.handle_id())
            .field("progress", &self.progress)
            .field("applied", &self.applied)
            .field("unplayable", &self.unplayable)
            .finish()
    }
}

/// Floor a reported position into `[0, max]`
fn whole_seconds(seconds: f64, max: u64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds.floor() as u64).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend whose handles accept every command and do nothing
    struct NullBackend;

    struct NullHandle;

    impl MediaHandle for NullHandle {
        fn play(&mut self) -> Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            Ok(())
        }
        fn position(&self) -> f64 {
            0.0
        }
        fn set_position(&mut self, _seconds: f64) -> Result<()> {
            Ok(())
        }
        fn duration(&self) -> Option<f64> {
            None
        }
        fn set_looping(&mut self, _looping: bool) -> Result<()> {
            Ok(())
        }
    }

    impl MediaBackend for NullBackend {
        fn open(&mut self, _url: &str, _id: HandleId) -> Result<Box<dyn MediaHandle>> {
            Ok(Box::new(NullHandle))
        }
    }

    fn episode(duration: u64) -> Episode {
        Episode {
            title: "Ep".to_string(),
            members: "Host".to_string(),
            thumbnail: "https://cdn.example.com/ep.jpg".to_string(),
            duration,
            url: "https://cdn.example.com/ep.mp3".to_string(),
        }
    }

    #[test]
    fn whole_seconds_floors_and_clamps() {
        assert_eq!(whole_seconds(12.9, 100), 12);
        assert_eq!(whole_seconds(-3.0, 100), 0);
        assert_eq!(whole_seconds(f64::NAN, 100), 0);
        assert_eq!(whole_seconds(250.2, 100), 100);
    }

    #[test]
    fn handle_ids_increase_per_mount() {
        let mut store = PlaybackStore::default();
        let mut view = PlayerView::new(ViewConfig::default(), Box::new(NullBackend));

        store.play(episode(60));
        view.sync(&mut store);
        let first = view.handle_id().unwrap();

        store
            .play_list(
                vec![episode(60), {
                    let mut other = episode(30);
                    other.url = "https://cdn.example.com/other.mp3".to_string();
                    other
                }],
                1,
            )
            .unwrap();
        view.sync(&mut store);
        let second = view.handle_id().unwrap();

        assert!(second > first);
    }

    #[test]
    fn seek_without_episode_is_an_error() {
        let mut view = PlayerView::new(ViewConfig::default(), Box::new(NullBackend));
        assert!(matches!(
            view.handle_seek(10),
            Err(MediaError::Unsupported(_))
        ));
        assert_eq!(view.progress(), 0);
    }

    #[test]
    fn debug_output_lists_handle() {
        let mut store = PlaybackStore::default();
        let mut view = PlayerView::new(ViewConfig::default(), Box::new(NullBackend));
        store.play(episode(60));
        view.sync(&mut store);

        let text = format!("{:?}", view);
        assert!(text.contains("HandleId(0)"));
    }
}
