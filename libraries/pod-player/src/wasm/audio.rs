//! `HTMLAudioElement`-backed playback handles

use crate::{
    error::{MediaError, Result},
    media::{HandleId, MediaBackend, MediaEvent, MediaHandle},
};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

/// Receives DOM media events, tagged with the handle that produced them
///
/// Events end up in `PlayerView::handle_media_event`, but the sink must not
/// call it synchronously: handling `ended` drops the handle whose listener
/// is still on the stack. Queue the event and deliver it from a microtask.
pub type EventSink = Rc<dyn Fn(HandleId, MediaEvent)>;

type Listener = Closure<dyn FnMut(Event)>;

/// Opens one detached `<audio>` element per episode
pub struct HtmlAudioBackend {
    sink: EventSink,
}

impl HtmlAudioBackend {
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }
}

impl MediaBackend for HtmlAudioBackend {
    fn open(&mut self, url: &str, id: HandleId) -> Result<Box<dyn MediaHandle>> {
        let element = HtmlAudioElement::new_with_src(url).map_err(|err| MediaError::Load {
            url: url.to_string(),
            reason: describe(&err),
        })?;
        element.set_preload("metadata");

        let mut handle = HtmlAudioHandle {
            id,
            element,
            sink: Rc::clone(&self.sink),
            listeners: Vec::new(),
        };

        handle.listen("timeupdate", id, &self.sink, |audio| {
            Some(MediaEvent::PositionChanged {
                seconds: audio.current_time(),
            })
        })?;
        handle.listen("loadedmetadata", id, &self.sink, |audio| {
            Some(MediaEvent::MetadataLoaded {
                duration: audio.duration(),
            })
        })?;
        handle.listen("ended", id, &self.sink, |_| Some(MediaEvent::Ended))?;
        handle.listen("play", id, &self.sink, |_| Some(MediaEvent::Started))?;
        handle.listen("pause", id, &self.sink, |_| Some(MediaEvent::Paused))?;
        handle.listen("error", id, &self.sink, |audio| {
            Some(MediaEvent::Error {
                message: error_message(audio),
            })
        })?;

        Ok(Box::new(handle))
    }
}

struct HtmlAudioHandle {
    id: HandleId,
    element: HtmlAudioElement,
    sink: EventSink,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioHandle {
    fn listen<F>(&mut self, name: &'static str, id: HandleId, sink: &EventSink, map: F) -> Result<()>
    where
        F: Fn(&HtmlAudioElement) -> Option<MediaEvent> + 'static,
    {
        let source = self.element.clone();
        let sink = Rc::clone(sink);
        let listener = Listener::new(move |_event: Event| {
            if let Some(event) = map(&source) {
                sink(id, event);
            }
        });

        self.element
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            .map_err(|err| MediaError::Unsupported(describe(&err)))?;
        self.listeners.push((name, listener));
        Ok(())
    }
}

impl MediaHandle for HtmlAudioHandle {
    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|err| MediaError::Playback(describe(&err)))?;

        // A blocked autoplay or an unsupported source only shows up as a
        // rejected promise: the element stays paused without a `pause` event
        let (id, sink) = (self.id, Rc::clone(&self.sink));
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                // Interrupted by pause() or a source change, not a failure
                if error_name(&err).as_deref() == Some("AbortError") {
                    return;
                }
                sink(
                    id,
                    MediaEvent::Error {
                        message: describe(&err),
                    },
                );
            }
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element
            .pause()
            .map_err(|err| MediaError::Playback(describe(&err)))
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.element.set_current_time(seconds);
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        duration.is_finite().then_some(duration)
    }

    fn set_looping(&mut self, looping: bool) -> Result<()> {
        self.element.set_loop(looping);
        Ok(())
    }
}

impl Drop for HtmlAudioHandle {
    fn drop(&mut self) {
        for (name, listener) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        let _ = self.element.pause();
        // Detach the source and reset the element so the download stops
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }
}

fn error_message(audio: &HtmlAudioElement) -> String {
    match audio.error().map(|err| err.code()) {
        Some(1) => "Playback was aborted before the media loaded".to_string(),
        Some(2) => "Network error while loading the episode".to_string(),
        Some(3) => "The episode could not be decoded".to_string(),
        Some(4) => "No supported source was found for the episode".to_string(),
        _ => "Unable to load the episode".to_string(),
    }
}

fn error_name(value: &JsValue) -> Option<String> {
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
