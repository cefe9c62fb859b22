//! Simulated media backend
//!
//! Stands in for a real audio element: a clock that only advances when
//! told to, emitting the same events a browser would. Events are queued
//! and delivered by the session, never from inside a handle command.

use pod_player::{HandleId, MediaBackend, MediaError, MediaEvent, MediaHandle};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::{Rc, Weak};
use tracing::trace;

type Outbox = Rc<RefCell<VecDeque<(HandleId, MediaEvent)>>>;

/// Playback state of one simulated handle
#[derive(Debug)]
struct SimMedia {
    id: HandleId,
    duration: f64,
    position: f64,
    playing: bool,
    looping: bool,
}

/// Shared state between the backend given to the view and the session
#[derive(Debug, Default)]
struct SimShared {
    durations: HashMap<String, u64>,
    broken: HashSet<String>,
    active: Weak<RefCell<SimMedia>>,
}

/// Backend handed to `PlayerView`
pub struct SimulatedBackend {
    shared: Rc<RefCell<SimShared>>,
    outbox: Outbox,
}

/// Session-side controls for the simulated clock and failures
#[derive(Clone)]
pub struct SimulatedControl {
    shared: Rc<RefCell<SimShared>>,
    outbox: Outbox,
}

/// Create a backend and its control pair
///
/// `durations` maps playable URLs to their media length; any other URL
/// fails to load.
pub fn simulated(durations: HashMap<String, u64>) -> (SimulatedBackend, SimulatedControl) {
    let shared = Rc::new(RefCell::new(SimShared {
        durations,
        ..Default::default()
    }));
    let outbox: Outbox = Rc::new(RefCell::new(VecDeque::new()));

    (
        SimulatedBackend {
            shared: Rc::clone(&shared),
            outbox: Rc::clone(&outbox),
        },
        SimulatedControl { shared, outbox },
    )
}

impl MediaBackend for SimulatedBackend {
    fn open(&mut self, url: &str, id: HandleId) -> pod_player::Result<Box<dyn MediaHandle>> {
        let mut shared = self.shared.borrow_mut();

        if shared.broken.contains(url) {
            return Err(MediaError::Load {
                url: url.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        let Some(&duration) = shared.durations.get(url) else {
            return Err(MediaError::Load {
                url: url.to_string(),
                reason: "unknown source".to_string(),
            });
        };

        let media = Rc::new(RefCell::new(SimMedia {
            id,
            duration: duration as f64,
            position: 0.0,
            playing: false,
            looping: false,
        }));
        shared.active = Rc::downgrade(&media);

        self.outbox.borrow_mut().push_back((
            id,
            MediaEvent::MetadataLoaded {
                duration: duration as f64,
            },
        ));

        Ok(Box::new(SimHandle {
            media,
            outbox: Rc::clone(&self.outbox),
        }))
    }
}

struct SimHandle {
    media: Rc<RefCell<SimMedia>>,
    outbox: Outbox,
}

impl SimHandle {
    fn emit(&self, event: MediaEvent) {
        let id = self.media.borrow().id;
        self.outbox.borrow_mut().push_back((id, event));
    }
}

impl MediaHandle for SimHandle {
    fn play(&mut self) -> pod_player::Result<()> {
        let started = {
            let mut media = self.media.borrow_mut();
            !std::mem::replace(&mut media.playing, true)
        };
        if started {
            self.emit(MediaEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) -> pod_player::Result<()> {
        let paused = std::mem::replace(&mut self.media.borrow_mut().playing, false);
        if paused {
            self.emit(MediaEvent::Paused);
        }
        Ok(())
    }

    fn position(&self) -> f64 {
        self.media.borrow().position
    }

    fn set_position(&mut self, seconds: f64) -> pod_player::Result<()> {
        let position = {
            let mut media = self.media.borrow_mut();
            media.position = seconds.clamp(0.0, media.duration);
            media.position
        };
        self.emit(MediaEvent::PositionChanged { seconds: position });
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        Some(self.media.borrow().duration)
    }

    fn set_looping(&mut self, looping: bool) -> pod_player::Result<()> {
        self.media.borrow_mut().looping = looping;
        Ok(())
    }
}

impl SimulatedControl {
    /// Advance the active handle's clock by `seconds`
    ///
    /// Emits a position update, then `Paused` and `Ended` when the media
    /// runs out. A looping handle wraps to the start instead.
    pub fn tick(&self, seconds: f64) {
        let Some(media) = self.shared.borrow().active.upgrade() else {
            return;
        };
        let mut media = media.borrow_mut();
        if !media.playing {
            return;
        }

        let mut outbox = self.outbox.borrow_mut();
        let target = media.position + seconds;

        if target < media.duration {
            media.position = target;
            outbox.push_back((media.id, MediaEvent::PositionChanged { seconds: target }));
        } else if media.looping && media.duration > 0.0 {
            media.position = target % media.duration;
            outbox.push_back((
                media.id,
                MediaEvent::PositionChanged {
                    seconds: media.position,
                },
            ));
        } else {
            media.position = media.duration;
            media.playing = false;
            outbox.push_back((
                media.id,
                MediaEvent::PositionChanged {
                    seconds: media.duration,
                },
            ));
            outbox.push_back((media.id, MediaEvent::Paused));
            outbox.push_back((media.id, MediaEvent::Ended));
        }
        trace!(position = media.position, "simulated tick");
    }

    /// Pause the active handle from outside the player (media key)
    pub fn external_pause(&self) {
        self.set_external(false);
    }

    /// Resume the active handle from outside the player (media key)
    pub fn external_resume(&self) {
        self.set_external(true);
    }

    fn set_external(&self, playing: bool) {
        let Some(media) = self.shared.borrow().active.upgrade() else {
            return;
        };
        let mut media = media.borrow_mut();
        if media.playing == playing {
            return;
        }
        media.playing = playing;

        let event = if playing {
            MediaEvent::Started
        } else {
            MediaEvent::Paused
        };
        self.outbox.borrow_mut().push_back((media.id, event));
    }

    /// Make `url` fail on its next load
    pub fn break_source(&self, url: &str) {
        self.shared.borrow_mut().broken.insert(url.to_string());
    }

    /// Undo `break_source`
    pub fn repair_source(&self, url: &str) {
        self.shared.borrow_mut().broken.remove(url);
    }

    /// Raise a playback error on the active handle
    pub fn fail_active(&self, message: &str) {
        let Some(media) = self.shared.borrow().active.upgrade() else {
            return;
        };
        let id = media.borrow().id;
        media.borrow_mut().playing = false;
        self.outbox.borrow_mut().push_back((
            id,
            MediaEvent::Error {
                message: message.to_string(),
            },
        ));
    }

    /// Take the next queued event
    pub fn next_event(&self) -> Option<(HandleId, MediaEvent)> {
        self.outbox.borrow_mut().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with(url: &str, duration: u64) -> (SimulatedBackend, SimulatedControl) {
        simulated([(url.to_string(), duration)].into_iter().collect())
    }

    fn drain(control: &SimulatedControl) -> Vec<MediaEvent> {
        std::iter::from_fn(|| control.next_event())
            .map(|(_, event)| event)
            .collect()
    }

    #[test]
    fn open_emits_metadata() {
        let (mut backend, control) = backend_with("a.mp3", 30);
        let _handle = backend.open("a.mp3", HandleId(4)).unwrap();

        assert_eq!(
            control.next_event(),
            Some((HandleId(4), MediaEvent::MetadataLoaded { duration: 30.0 }))
        );
    }

    #[test]
    fn unknown_and_broken_sources_fail() {
        let (mut backend, control) = backend_with("a.mp3", 30);
        assert!(backend.open("b.mp3", HandleId(0)).is_err());

        control.break_source("a.mp3");
        assert!(backend.open("a.mp3", HandleId(1)).is_err());

        control.repair_source("a.mp3");
        assert!(backend.open("a.mp3", HandleId(2)).is_ok());
    }

    #[test]
    fn tick_only_advances_while_playing() {
        let (mut backend, control) = backend_with("a.mp3", 30);
        let mut handle = backend.open("a.mp3", HandleId(0)).unwrap();
        drain(&control);

        control.tick(5.0);
        assert_eq!(handle.position(), 0.0);

        handle.play().unwrap();
        control.tick(5.0);
        assert_eq!(handle.position(), 5.0);
        assert_eq!(
            drain(&control),
            vec![
                MediaEvent::Started,
                MediaEvent::PositionChanged { seconds: 5.0 }
            ]
        );
    }

    #[test]
    fn tick_past_end_pauses_then_ends() {
        let (mut backend, control) = backend_with("a.mp3", 10);
        let mut handle = backend.open("a.mp3", HandleId(0)).unwrap();
        handle.play().unwrap();
        drain(&control);

        control.tick(15.0);
        assert_eq!(
            drain(&control),
            vec![
                MediaEvent::PositionChanged { seconds: 10.0 },
                MediaEvent::Paused,
                MediaEvent::Ended
            ]
        );
    }

    #[test]
    fn looping_wraps_instead_of_ending() {
        let (mut backend, control) = backend_with("a.mp3", 10);
        let mut handle = backend.open("a.mp3", HandleId(0)).unwrap();
        handle.set_looping(true).unwrap();
        handle.play().unwrap();
        drain(&control);

        control.tick(12.0);
        assert_eq!(
            drain(&control),
            vec![MediaEvent::PositionChanged { seconds: 2.0 }]
        );
    }

    #[test]
    fn dropped_handle_stops_ticking() {
        let (mut backend, control) = backend_with("a.mp3", 10);
        let mut handle = backend.open("a.mp3", HandleId(0)).unwrap();
        handle.play().unwrap();
        drop(handle);
        drain(&control);

        control.tick(1.0);
        assert!(control.next_event().is_none());
    }
}
