//! Speech playback
//!
//! Drives an external narration service with the rendered text and maps its
//! character-offset progress events onto highlight ranges.
//!
//! ## Modules
//!
//! - `config`: language, voice and prosody settings
//! - `session`: session tokens and service messages
//! - `synchronizer`: the playback state machine
//! - `narrator`: port trait for the narration service

pub mod config;
pub mod narrator;
pub mod session;
pub mod synchronizer;

pub use config::SpeechConfig;
pub use narrator::{execute, Narrator, SpeakFailure};
pub use session::{NarrationCommand, NarrationEvent, PlaybackStatus, SessionId, Utterance};
pub use synchronizer::{EventOutcome, HighlightedView, PlaybackState, SpeechSynchronizer};
