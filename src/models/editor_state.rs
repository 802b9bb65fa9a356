//! Editor state management
//!
//! `EditorState` is the WASM-owned source of truth: the edit controller, the
//! speech synchronizer and the narration settings. It also enforces the one
//! rule that spans both: editing the text while a session is active stops
//! the session, since the snapshot being spoken would no longer match the
//! buffer's offsets.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::speech::{
    EventOutcome, HighlightedView, NarrationCommand, NarrationEvent, PlaybackStatus, SpeechConfig,
    SpeechSynchronizer,
};
use crate::text::{EditController, EditResult, HighlightRange};

/// Everything the presentation shell renders
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    pub text: String,
    pub cursor: usize,
    pub highlight: Option<HighlightRange>,
    pub playback: PlaybackStatus,
    /// Most recent user-visible narration failure, cleared on the next start
    pub last_error: Option<PlaybackError>,
}

/// Result of an edit: the edit itself plus any narration work it caused
#[derive(Clone, Debug, PartialEq)]
pub struct EditorUpdate {
    pub edit: EditResult,
    pub narration: Vec<NarrationCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    controller: EditController,
    speech: SpeechSynchronizer,
    config: SpeechConfig,
    last_error: Option<PlaybackError>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            controller: EditController::with_text(text),
            ..Self::default()
        }
    }

    pub fn controller(&self) -> &EditController {
        &self.controller
    }

    pub fn speech(&self) -> &SpeechSynchronizer {
        &self.speech
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SpeechConfig) {
        self.config = config;
    }

    pub fn insert(&mut self, key: char) -> EditorUpdate {
        self.edit(|controller| controller.insert(key))
    }

    pub fn backspace(&mut self) -> EditorUpdate {
        self.edit(|controller| controller.backspace())
    }

    pub fn set_text(&mut self, text: &str, cursor: Option<usize>) -> EditorUpdate {
        self.edit(|controller| controller.set_text(text, cursor))
    }

    /// Cursor moves leave the text (and so any session) alone
    pub fn move_cursor_to(&mut self, offset: usize) -> EditResult {
        self.controller.move_cursor_to(offset)
    }

    /// Narrate the current text, superseding any active session
    pub fn start_playback(&mut self) -> Vec<NarrationCommand> {
        if self.controller.buffer().is_empty() {
            return Vec::new();
        }
        self.last_error = None;
        self.speech.start(self.controller.text(), &self.config)
    }

    pub fn stop_playback(&mut self) -> Vec<NarrationCommand> {
        self.speech.stop()
    }

    /// Apply a narration service signal
    pub fn handle_narration(&mut self, event: NarrationEvent) -> EventOutcome {
        let outcome = self.speech.handle(event);
        if let EventOutcome::Failed(error) = &outcome {
            if !error.is_cancellation() {
                self.last_error = Some(error.clone());
            }
        }
        outcome
    }

    /// Split text for rendering; while a session is active this slices the
    /// snapshot the offsets refer to.
    pub fn highlighted_view(&self) -> HighlightedView {
        let text = self
            .speech
            .session_text()
            .unwrap_or_else(|| self.controller.text());
        self.speech.highlighted_view(text)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            text: self.controller.text().to_string(),
            cursor: self.controller.cursor(),
            highlight: self.speech.highlight(),
            playback: self.speech.status(),
            last_error: self.last_error.clone(),
        }
    }

    fn edit(&mut self, op: impl FnOnce(&mut EditController) -> EditResult) -> EditorUpdate {
        let version = self.controller.buffer().version();
        let edit = op(&mut self.controller);

        let narration = if self.controller.buffer().version() != version {
            self.speech.stop()
        } else {
            Vec::new()
        };
        EditorUpdate { edit, narration }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(text: &str) -> EditorState {
        let mut state = EditorState::with_text(text);
        state.start_playback();
        let session = state.speech().active_session().unwrap();
        state.handle_narration(NarrationEvent::Started(session));
        state
    }

    #[test]
    fn test_snapshot_reflects_edits() {
        let mut state = EditorState::new();
        state.insert('ㄱ');
        state.insert('ㅏ');

        let snapshot = state.snapshot();
        assert_eq!(snapshot.text, "가");
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(snapshot.highlight, None);
        assert_eq!(snapshot.playback, PlaybackStatus::Idle);
    }

    #[test]
    fn test_edit_while_playing_stops_session() {
        let mut state = playing("안녕");
        assert_eq!(state.snapshot().playback, PlaybackStatus::Playing);

        let update = state.insert('!');
        assert_eq!(update.narration, vec![NarrationCommand::Cancel]);
        assert_eq!(state.snapshot().playback, PlaybackStatus::Idle);
        assert_eq!(state.snapshot().highlight, None);
    }

    #[test]
    fn test_cursor_move_keeps_session() {
        let mut state = playing("안녕");
        state.move_cursor_to(0);
        assert_eq!(state.snapshot().playback, PlaybackStatus::Playing);
    }

    #[test]
    fn test_noop_edit_keeps_session() {
        let mut state = playing("안녕");
        state.move_cursor_to(0);

        let update = state.backspace();
        assert!(update.narration.is_empty());
        assert_eq!(state.snapshot().playback, PlaybackStatus::Playing);
    }

    #[test]
    fn test_start_on_empty_text_is_noop() {
        let mut state = EditorState::new();
        assert!(state.start_playback().is_empty());
        assert_eq!(state.snapshot().playback, PlaybackStatus::Idle);
    }

    #[test]
    fn test_failure_recorded_unless_cancellation() {
        let mut state = playing("안녕");
        let session = state.speech().active_session().unwrap();
        state.handle_narration(NarrationEvent::Failed {
            session,
            error: PlaybackError::new("interrupted", ""),
        });
        assert_eq!(state.snapshot().last_error, None);

        state.start_playback();
        let session = state.speech().active_session().unwrap();
        let error = PlaybackError::new("audio-busy", "device in use");
        state.handle_narration(NarrationEvent::Failed {
            session,
            error: error.clone(),
        });
        assert_eq!(state.snapshot().last_error, Some(error));
        assert_eq!(state.snapshot().playback, PlaybackStatus::Idle);

        // Next start clears it
        state.start_playback();
        assert_eq!(state.snapshot().last_error, None);
    }

    #[test]
    fn test_speech_config_carried_into_utterance() {
        let mut state = EditorState::with_text("안녕");
        state.set_config(SpeechConfig {
            rate: 0.7,
            ..SpeechConfig::default()
        });

        let commands = state.start_playback();
        let Some(NarrationCommand::Speak(utterance)) = commands.last() else {
            panic!("expected speak command");
        };
        assert_eq!(utterance.config.rate, 0.7);
    }
}
