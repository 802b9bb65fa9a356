//! Speech playback synchronizer
//!
//! State machine: Idle -> Starting -> Playing -> Idle, with Stop or Error
//! returning to Idle from Starting or Playing. The highlight lives inside the
//! `Playing` variant, so it exists exactly while playing and is dropped in
//! the same assignment that leaves that state.
//!
//! The synchronizer never talks to the service directly. `start` and `stop`
//! return the `NarrationCommand`s the caller must run, and service signals
//! come back through `handle` tagged with their session.

use serde::{Deserialize, Serialize};

use super::config::SpeechConfig;
use super::session::{NarrationCommand, NarrationEvent, PlaybackStatus, SessionId, Utterance};
use crate::error::PlaybackError;
use crate::text::cursor::HighlightRange;
use crate::utils::chars::{char_len, slice_chars};

/// Text snapshot taken at `start`; all boundary offsets refer to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub id: SessionId,
    pub text: String,
    pub char_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Starting(ActiveSession),
    Playing(ActiveSession, HighlightRange),
}

/// What became of an inbound service event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// Stale session, duplicate signal or out-of-range offsets
    Dropped,
    /// The active session failed and is now over
    Failed(PlaybackError),
}

/// Text split around the highlight for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HighlightedView {
    Plain {
        text: String,
    },
    Split {
        before: String,
        highlighted: String,
        after: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SpeechSynchronizer {
    state: PlaybackState,
    last_session: u64,
}

impl SpeechSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        match self.state {
            PlaybackState::Idle => PlaybackStatus::Idle,
            PlaybackState::Starting(_) => PlaybackStatus::Starting,
            PlaybackState::Playing(..) => PlaybackStatus::Playing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_session().is_some()
    }

    pub fn active_session(&self) -> Option<SessionId> {
        match &self.state {
            PlaybackState::Idle => None,
            PlaybackState::Starting(session) | PlaybackState::Playing(session, _) => {
                Some(session.id)
            }
        }
    }

    /// Text snapshot of the active session
    pub fn session_text(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::Idle => None,
            PlaybackState::Starting(session) | PlaybackState::Playing(session, _) => {
                Some(&session.text)
            }
        }
    }

    pub fn highlight(&self) -> Option<HighlightRange> {
        match &self.state {
            PlaybackState::Playing(_, range) => Some(*range),
            _ => None,
        }
    }

    /// Begin narrating `text`, superseding any active session.
    ///
    /// Empty text is a no-op and leaves any active session running.
    pub fn start(&mut self, text: &str, config: &SpeechConfig) -> Vec<NarrationCommand> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut commands = self.stop();
        self.last_session += 1;
        let id = SessionId(self.last_session);

        self.state = PlaybackState::Starting(ActiveSession {
            id,
            text: text.to_string(),
            char_len: char_len(text),
        });
        log::debug!("playback session {:?} starting ({} chars)", id, char_len(text));

        commands.push(NarrationCommand::Speak(Utterance {
            session: id,
            text: text.to_string(),
            config: config.clone(),
        }));
        commands
    }

    /// Cancel the active session, if any. Idempotent.
    pub fn stop(&mut self) -> Vec<NarrationCommand> {
        match std::mem::take(&mut self.state) {
            PlaybackState::Idle => Vec::new(),
            PlaybackState::Starting(session) | PlaybackState::Playing(session, _) => {
                log::debug!("playback session {:?} stopped", session.id);
                vec![NarrationCommand::Cancel]
            }
        }
    }

    /// Apply a service signal, dropping anything not for the active session
    pub fn handle(&mut self, event: NarrationEvent) -> EventOutcome {
        if self.active_session() != Some(event.session()) {
            log::debug!("dropping stale narration event {:?}", event);
            return EventOutcome::Dropped;
        }

        match event {
            NarrationEvent::Started(_) => self.on_started(),
            NarrationEvent::Boundary {
                char_index,
                char_length,
                ..
            } => self.on_boundary(char_index, char_length),
            NarrationEvent::Ended(_) => {
                self.state = PlaybackState::Idle;
                EventOutcome::Applied
            }
            NarrationEvent::Failed { error, .. } => {
                self.state = PlaybackState::Idle;
                log::warn!("narration failed: {}", error);
                EventOutcome::Failed(error)
            }
        }
    }

    /// Split `text` around the highlight while playing; plain otherwise
    pub fn highlighted_view(&self, text: &str) -> HighlightedView {
        match self.highlight() {
            Some(range) => HighlightedView::Split {
                before: slice_chars(text, 0, range.start).to_string(),
                highlighted: slice_chars(text, range.start, range.end).to_string(),
                after: slice_chars(text, range.end, usize::MAX).to_string(),
            },
            None => HighlightedView::Plain {
                text: text.to_string(),
            },
        }
    }

    fn on_started(&mut self) -> EventOutcome {
        match std::mem::take(&mut self.state) {
            PlaybackState::Starting(session) => {
                self.state = PlaybackState::Playing(session, HighlightRange::empty());
                EventOutcome::Applied
            }
            other => {
                self.state = other;
                EventOutcome::Dropped
            }
        }
    }

    fn on_boundary(&mut self, char_index: usize, char_length: usize) -> EventOutcome {
        let text_len = match &self.state {
            PlaybackState::Starting(session) | PlaybackState::Playing(session, _) => {
                session.char_len
            }
            PlaybackState::Idle => return EventOutcome::Dropped,
        };

        let Some(range) = HighlightRange::checked(char_index, char_length, text_len) else {
            log::warn!(
                "dropping boundary ({}, {}) outside {} chars",
                char_index,
                char_length,
                text_len
            );
            return EventOutcome::Dropped;
        };

        // A boundary before the start signal means the service is already speaking
        match std::mem::take(&mut self.state) {
            PlaybackState::Starting(session) | PlaybackState::Playing(session, _) => {
                self.state = PlaybackState::Playing(session, range);
                EventOutcome::Applied
            }
            PlaybackState::Idle => EventOutcome::Dropped,
        }
    }
}
