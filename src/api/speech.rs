//! Playback API and the Web Speech narrator
//!
//! `speechSynthesis` queues utterances and keeps firing events for canceled
//! ones, so every handler is tagged with its session and routed through the
//! synchronizer, which drops anything stale.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::api::helpers::{deserialize, lock_editor, publish_snapshot, serialize};
use crate::error::{KvasaError, PlaybackError};
use crate::speech::narrator::{self, Narrator};
use crate::speech::{EventOutcome, NarrationCommand, NarrationEvent, SessionId, SpeechConfig, Utterance};
use crate::utils::chars::boundary_to_char_range;
use crate::{wasm_info, wasm_warn};

type EventHandler = Closure<dyn FnMut(JsValue)>;

thread_local! {
    // The live utterance must stay referenced or some engines collect it
    // mid-sentence and stop firing events.
    static ACTIVE_UTTERANCE: RefCell<Option<LiveUtterance>> = RefCell::new(None);
}

/// An utterance handed to the browser together with its event handlers
struct LiveUtterance {
    utterance: SpeechSynthesisUtterance,
    _handlers: [EventHandler; 4],
}

impl LiveUtterance {
    /// Unhook the handlers so late events from this utterance go nowhere
    fn detach(&self) {
        self.utterance.set_onstart(None);
        self.utterance.set_onboundary(None);
        self.utterance.set_onend(None);
        self.utterance.set_onerror(None);
    }
}

fn replace_active(next: Option<LiveUtterance>) {
    let previous = ACTIVE_UTTERANCE.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), next));
    if let Some(previous) = previous {
        previous.detach();
    }
}

/// `Narrator` backed by `window.speechSynthesis`
pub struct WebNarrator {
    synth: SpeechSynthesis,
}

impl WebNarrator {
    pub fn from_window() -> Result<Self, KvasaError> {
        let window = web_sys::window().ok_or(KvasaError::NoWindow)?;
        let synth = window
            .speech_synthesis()
            .map_err(|e| KvasaError::SpeechUnavailable(format!("{:?}", e)))?;
        Ok(Self { synth })
    }

    fn find_voice(&self, name: &str) -> Option<SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|voice| voice.dyn_into::<SpeechSynthesisVoice>().ok())
            .find(|voice| voice.name() == name)
    }
}

impl Narrator for WebNarrator {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), KvasaError> {
        let config = &utterance.config;
        let live = SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|e| KvasaError::SpeechUnavailable(format!("{:?}", e)))?;
        live.set_lang(&config.lang);
        live.set_rate(config.rate);
        live.set_pitch(config.pitch);
        live.set_volume(config.volume);

        if let Some(name) = &config.voice {
            match self.find_voice(name) {
                Some(voice) => live.set_voice(Some(&voice)),
                None => wasm_warn!("voice {:?} not installed, using default", name),
            }
        }

        let handlers = attach_handlers(&live, utterance.session, utterance.text.clone());
        replace_active(Some(LiveUtterance {
            utterance: live.clone(),
            _handlers: handlers,
        }));

        self.synth.speak(&live);
        Ok(())
    }

    fn cancel(&mut self) {
        replace_active(None);
        self.synth.cancel();
    }
}

fn attach_handlers(
    utterance: &SpeechSynthesisUtterance,
    session: SessionId,
    text: String,
) -> [EventHandler; 4] {
    let on_start = Closure::wrap(Box::new(move |_event: JsValue| {
        deliver(NarrationEvent::Started(session));
    }) as Box<dyn FnMut(JsValue)>);

    let on_boundary = Closure::wrap(Box::new(move |event: JsValue| {
        let Some((char_index, char_length)) = boundary_range(&event, &text) else {
            return;
        };
        deliver(NarrationEvent::Boundary {
            session,
            char_index,
            char_length,
        });
    }) as Box<dyn FnMut(JsValue)>);

    let on_end = Closure::wrap(Box::new(move |_event: JsValue| {
        deliver(NarrationEvent::Ended(session));
    }) as Box<dyn FnMut(JsValue)>);

    let on_error = Closure::wrap(Box::new(move |event: JsValue| {
        let code = string_field(&event, "error").unwrap_or_else(|| "unknown".to_string());
        let error = PlaybackError::new(code, "speech synthesis error event");
        deliver(NarrationEvent::Failed { session, error });
    }) as Box<dyn FnMut(JsValue)>);

    utterance.set_onstart(Some(on_start.as_ref().unchecked_ref()));
    utterance.set_onboundary(Some(on_boundary.as_ref().unchecked_ref()));
    utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));
    utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    [on_start, on_boundary, on_end, on_error]
}

/// Rendered-character range of a `SpeechSynthesisEvent` boundary over `text`.
///
/// `None` for events missing `charIndex`/`charLength` or pointing outside
/// the utterance; those are dropped.
pub fn boundary_range(event: &JsValue, text: &str) -> Option<(usize, usize)> {
    let (Some(index), Some(length)) = (
        number_field(event, "charIndex"),
        number_field(event, "charLength"),
    ) else {
        wasm_warn!("dropping boundary event without charIndex/charLength");
        return None;
    };

    let range = boundary_to_char_range(text, index, length);
    if range.is_none() {
        wasm_warn!("dropping boundary ({}, {}) outside utterance", index, length);
    }
    range
}

/// Read a non-negative integer field; absent, fractional or negative is `None`
fn number_field(event: &JsValue, name: &str) -> Option<usize> {
    js_sys::Reflect::get(event, &JsValue::from_str(name))
        .ok()?
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as usize)
}

fn string_field(event: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(event, &JsValue::from_str(name))
        .ok()?
        .as_string()
}

/// Route a service signal into the editor state and tell the shell
fn deliver(event: NarrationEvent) {
    let outcome = match lock_editor() {
        Ok(mut state) => state.handle_narration(event),
        Err(_) => return,
    };

    match outcome {
        EventOutcome::Dropped => return,
        EventOutcome::Failed(error) if !error.is_cancellation() => {
            wasm_warn!("Playback failed: {}", error);
        }
        _ => {}
    }

    if let Err(e) = publish_snapshot() {
        wasm_warn!("failed to publish snapshot: {:?}", e);
    }
}

/// Run narration commands with the editor lock released.
///
/// Utterances the browser refuses are failed through the synchronizer so
/// the session does not hang in `Starting`.
pub(crate) fn dispatch(commands: Vec<NarrationCommand>) {
    if commands.is_empty() {
        return;
    }

    let failures = match WebNarrator::from_window() {
        Ok(mut web) => narrator::execute(&mut web, commands),
        Err(error) => commands
            .into_iter()
            .filter_map(|command| match command {
                NarrationCommand::Speak(utterance) => Some(narrator::SpeakFailure {
                    session: utterance.session,
                    error: error.clone(),
                }),
                NarrationCommand::Cancel => None,
            })
            .collect(),
    };

    for failure in failures {
        deliver(NarrationEvent::Failed {
            session: failure.session,
            error: PlaybackError::new("unavailable", failure.error.to_string()),
        });
    }
}

// ============================================================================
// WASM API Functions
// ============================================================================

/// Read the current text aloud, superseding any active session
#[wasm_bindgen(js_name = startPlayback)]
pub fn start_playback() -> Result<JsValue, JsValue> {
    wasm_info!("startPlayback called");

    let commands = lock_editor()?.start_playback();
    dispatch(commands);
    publish_snapshot()
}

/// Stop playback and clear the highlight. Safe to call while idle.
#[wasm_bindgen(js_name = stopPlayback)]
pub fn stop_playback() -> Result<JsValue, JsValue> {
    wasm_info!("stopPlayback called");

    let commands = lock_editor()?.stop_playback();
    dispatch(commands);
    publish_snapshot()
}

/// Set narration language, voice and prosody from a JS object
#[wasm_bindgen(js_name = configureSpeech)]
pub fn configure_speech(config_js: JsValue) -> Result<JsValue, JsValue> {
    let config: SpeechConfig = deserialize(config_js, "Failed to deserialize speech config")?;
    apply_config(config)
}

/// Set narration settings from a JSON string
#[wasm_bindgen(js_name = configureSpeechJson)]
pub fn configure_speech_json(json: &str) -> Result<JsValue, JsValue> {
    let config = SpeechConfig::from_json(json)?;
    apply_config(config)
}

fn apply_config(config: SpeechConfig) -> Result<JsValue, JsValue> {
    config.validate()?;
    wasm_info!("speech config: lang={} rate={} voice={:?}", config.lang, config.rate, config.voice);

    let mut state = lock_editor()?;
    state.set_config(config);
    serialize(state.config(), "Failed to serialize speech config")
}

/// Current narration settings
#[wasm_bindgen(js_name = getSpeechConfig)]
pub fn get_speech_config() -> Result<JsValue, JsValue> {
    let state = lock_editor()?;
    serialize(state.config(), "Failed to serialize speech config")
}

/// Split the text around the spoken range (plain text while idle)
#[wasm_bindgen(js_name = getHighlightedView)]
pub fn get_highlighted_view() -> Result<JsValue, JsValue> {
    let view = lock_editor()?.highlighted_view();
    serialize(&view, "Failed to serialize highlighted view")
}
