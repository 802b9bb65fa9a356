//! Narration service port
//!
//! The synchronizer decides what to say and when to cancel; a `Narrator`
//! carries those commands to an actual speech engine. The browser adapter
//! lives in `api::speech`.

use super::session::{NarrationCommand, SessionId, Utterance};
use crate::error::KvasaError;

pub trait Narrator {
    /// Submit an utterance. Progress comes back later as `NarrationEvent`s.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), KvasaError>;

    /// Cancel anything queued or speaking
    fn cancel(&mut self);
}

/// An utterance the narrator refused to accept
#[derive(Debug, Clone)]
pub struct SpeakFailure {
    pub session: SessionId,
    pub error: KvasaError,
}

/// Run commands in order, collecting utterances that failed to submit.
///
/// Failed sessions never get a service callback, so the caller must fail
/// them itself.
pub fn execute<N: Narrator + ?Sized>(
    narrator: &mut N,
    commands: Vec<NarrationCommand>,
) -> Vec<SpeakFailure> {
    let mut failures = Vec::new();
    for command in commands {
        match command {
            NarrationCommand::Cancel => narrator.cancel(),
            NarrationCommand::Speak(utterance) => {
                if let Err(error) = narrator.speak(&utterance) {
                    log::warn!("speak failed for session {:?}: {}", utterance.session, error);
                    failures.push(SpeakFailure {
                        session: utterance.session,
                        error,
                    });
                }
            }
        }
    }
    failures
}
