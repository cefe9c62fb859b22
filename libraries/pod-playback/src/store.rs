//! Playback store - the single source of truth for the player
//!
//! Holds the episode queue and transport flags. All mutation goes through
//! `dispatch`; the named intent methods are thin wrappers around it.

use crate::{
    error::Result,
    events::{PlayerAction, StoreEvent},
    queue::Queue,
    shuffle::{picker_for, IndexPicker},
    types::{Episode, IndexPolicy, PlaybackSnapshot, StoreConfig},
};
use tracing::debug;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent, &PlaybackSnapshot)>;

/// Playback state store
///
/// Owned explicitly by the application root and lent to views. There is no
/// process-wide instance.
///
/// State:
/// - Queue (replaced wholesale, never appended)
/// - Current index (present iff the queue is non-empty)
/// - Playing / looping / shuffling flags
pub struct PlaybackStore {
    queue: Option<Queue>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    queue_generation: u64,

    index_policy: IndexPolicy,
    picker: Box<dyn IndexPicker>,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,

    // Events waiting for `drain_events`
    pending_events: Vec<StoreEvent>,
}

impl PlaybackStore {
    /// Create a new store
    pub fn new(config: StoreConfig) -> Self {
        let picker = picker_for(config.shuffle_seed);
        Self::with_picker(config, picker)
    }

    /// Create a store with a custom random index source
    pub fn with_picker(config: StoreConfig, picker: Box<dyn IndexPicker>) -> Self {
        Self {
            queue: None,
            is_playing: false,
            is_looping: config.looping,
            is_shuffling: config.shuffling,
            queue_generation: 0,
            index_policy: config.index_policy,
            picker,
            subscribers: Vec::new(),
            next_subscription: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Dispatch =====

    /// Apply an action
    ///
    /// Only `PlayList` can fail; a failed action leaves the state untouched
    /// and emits nothing.
    pub fn dispatch(&mut self, action: PlayerAction) -> Result<()> {
        debug!(action = action_name(&action), "dispatch");

        let mut events = Vec::new();

        match action {
            PlayerAction::Play { episode } => {
                self.queue = Some(Queue::single(episode));
                self.queue_generation += 1;
                events.push(StoreEvent::QueueReplaced {
                    length: 1,
                    index: 0,
                });
                self.apply_playing(true, &mut events);
            }
            PlayerAction::PlayList { episodes, index } => {
                let queue = Queue::new(episodes, index, self.index_policy)?;
                events.push(StoreEvent::QueueReplaced {
                    length: queue.len(),
                    index: queue.index(),
                });
                self.queue = Some(queue);
                self.queue_generation += 1;
                self.apply_playing(true, &mut events);
            }
            PlayerAction::PlayNext => self.apply_next(&mut events),
            PlayerAction::PlayPrev => {
                if let Some(queue) = self.queue.as_mut() {
                    let from = queue.index();
                    if queue.go_back() {
                        events.push(StoreEvent::SelectionChanged {
                            from,
                            to: queue.index(),
                        });
                    }
                }
            }
            PlayerAction::TogglePlay => {
                let target = !self.is_playing;
                self.apply_playing(target, &mut events);
            }
            PlayerAction::SetPlayingState { playing } => {
                self.apply_playing(playing, &mut events);
            }
            PlayerAction::ToggleLooping => {
                self.is_looping = !self.is_looping;
                events.push(StoreEvent::LoopingChanged {
                    looping: self.is_looping,
                });
            }
            PlayerAction::ToggleShuffle => {
                self.is_shuffling = !self.is_shuffling;
                events.push(StoreEvent::ShuffleChanged {
                    shuffling: self.is_shuffling,
                });
            }
        }

        self.commit(events);
        Ok(())
    }

    fn apply_next(&mut self, events: &mut Vec<StoreEvent>) {
        let Some(queue) = self.queue.as_mut() else {
            return;
        };
        let from = queue.index();

        if self.is_shuffling {
            let to = self.picker.pick(queue.len());
            if queue.select(to).is_err() {
                debug!(to, len = queue.len(), "shuffle pick out of range, ignored");
                return;
            }
        } else if !queue.advance() {
            return;
        }

        let to = queue.index();
        if to != from {
            events.push(StoreEvent::SelectionChanged { from, to });
        }
    }

    /// `is_playing` can only become true while an episode is selected
    fn apply_playing(&mut self, playing: bool, events: &mut Vec<StoreEvent>) {
        let playing = playing && self.queue.is_some();
        if self.is_playing != playing {
            self.is_playing = playing;
            events.push(StoreEvent::PlayingChanged { playing });
        }
    }

    fn commit(&mut self, events: Vec<StoreEvent>) {
        if events.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for event in &events {
            for (_, subscriber) in &mut self.subscribers {
                subscriber(event, &snapshot);
            }
        }
        self.pending_events.extend(events);
    }

    // ===== Intents =====

    /// Play a single episode, replacing the queue
    pub fn play(&mut self, episode: Episode) {
        // Cannot fail: a one-episode queue always has a valid index
        let _ = self.dispatch(PlayerAction::Play { episode });
    }

    /// Play a list starting at `index`, replacing the queue
    pub fn play_list(&mut self, episodes: Vec<Episode>, index: usize) -> Result<()> {
        self.dispatch(PlayerAction::PlayList { episodes, index })
    }

    /// Go to the next episode
    ///
    /// Shuffling picks a random index (possibly the same one). Otherwise
    /// advances by one, or does nothing at the last episode.
    pub fn play_next(&mut self) {
        let _ = self.dispatch(PlayerAction::PlayNext);
    }

    /// Go to the previous episode, or do nothing at the first one
    pub fn play_prev(&mut self) {
        let _ = self.dispatch(PlayerAction::PlayPrev);
    }

    pub fn toggle_play(&mut self) {
        let _ = self.dispatch(PlayerAction::TogglePlay);
    }

    /// Set play/pause directly
    ///
    /// Used to mirror play/pause that originated at the media handle.
    pub fn set_playing_state(&mut self, playing: bool) {
        let _ = self.dispatch(PlayerAction::SetPlayingState { playing });
    }

    pub fn toggle_looping(&mut self) {
        let _ = self.dispatch(PlayerAction::ToggleLooping);
    }

    pub fn toggle_shuffle(&mut self) {
        let _ = self.dispatch(PlayerAction::ToggleShuffle);
    }

    // ===== Subscriptions =====

    /// Register a callback run after every committed change
    ///
    /// The callback receives each event together with the state as of the
    /// end of the action that produced it.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &PlaybackSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== State Queries =====

    /// Episodes in playback order (empty slice when nothing is queued)
    pub fn queue(&self) -> &[Episode] {
        self.queue.as_ref().map(Queue::episodes).unwrap_or(&[])
    }

    pub fn queue_len(&self) -> usize {
        self.queue.as_ref().map_or(0, Queue::len)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.as_ref().map(Queue::index)
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.as_ref().map(Queue::current)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// True when the current index is above zero
    pub fn has_previous(&self) -> bool {
        self.queue.as_ref().is_some_and(Queue::has_previous)
    }

    /// True when another episode follows the current one
    pub fn has_next(&self) -> bool {
        self.queue.as_ref().is_some_and(Queue::has_next)
    }

    /// Bumped every time the queue is replaced
    ///
    /// Replaying the same episode still counts, so views can tell a fresh
    /// request apart from the selection they already handled.
    pub fn queue_generation(&self) -> u64 {
        self.queue_generation
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            queue: self.queue().to_vec(),
            current_index: self.current_index(),
            is_playing: self.is_playing,
            is_looping: self.is_looping,
            is_shuffling: self.is_shuffling,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl std::fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackStore")
            .field("queue_len", &self.queue_len())
            .field("current_index", &self.current_index())
            .field("is_playing", &self.is_playing)
            .field("is_looping", &self.is_looping)
            .field("is_shuffling", &self.is_shuffling)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn action_name(action: &PlayerAction) -> &'static str {
    match action {
        PlayerAction::Play { .. } => "play",
        PlayerAction::PlayList { .. } => "play_list",
        PlayerAction::PlayNext => "play_next",
        PlayerAction::PlayPrev => "play_prev",
        PlayerAction::TogglePlay => "toggle_play",
        PlayerAction::SetPlayingState { .. } => "set_playing_state",
        PlayerAction::ToggleLooping => "toggle_looping",
        PlayerAction::ToggleShuffle => "toggle_shuffle",
    }
}
