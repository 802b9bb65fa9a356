//! Playback session identity and the messages exchanged with the narration service

use serde::{Deserialize, Serialize};

use super::config::SpeechConfig;
use crate::error::PlaybackError;

/// Token tagging one `start`. Events carrying any other token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

/// A request to speak `text`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub session: SessionId,
    pub text: String,
    pub config: SpeechConfig,
}

/// Work the caller must perform against the narration service
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationCommand {
    /// Cancel whatever the service is speaking
    Cancel,
    Speak(Utterance),
}

/// Signals from the narration service, tagged with the session they belong to.
///
/// Offsets are in rendered characters of the utterance text.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationEvent {
    Started(SessionId),
    Boundary {
        session: SessionId,
        char_index: usize,
        char_length: usize,
    },
    Ended(SessionId),
    Failed {
        session: SessionId,
        error: PlaybackError,
    },
}

impl NarrationEvent {
    pub fn session(&self) -> SessionId {
        match self {
            NarrationEvent::Started(session) | NarrationEvent::Ended(session) => *session,
            NarrationEvent::Boundary { session, .. } | NarrationEvent::Failed { session, .. } => {
                *session
            }
        }
    }
}

/// Coarse playback state reported to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    Idle,
    Starting,
    Playing,
}
