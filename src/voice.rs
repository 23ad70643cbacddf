use crate::app_core::{AppCore, FilePicker};
use thiserror::Error;

/// Classified speech-to-text failure, mirrored from the recognizer's two
/// failure modes: audio that could not be transcribed, and a recognition
/// service that could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech was not understood")]
    NotUnderstood,
    #[error("speech recognition service unavailable")]
    ServiceUnavailable,
}

/// Speech-to-text collaborator. `listen` blocks until the recognizer
/// returns (no timeout or cancellation) and yields an already-lowercased
/// transcript. No implementation ships with this crate; shells and tests
/// provide one.
pub trait SpeechRecognizer {
    fn listen(&mut self) -> Result<String, SpeechError>;
}

/// One voice interaction: announce that we are listening, block on the
/// recognizer, then dispatch the transcript as a command. Recognizer
/// failures become ordinary status messages.
pub fn listen_and_run(
    core: &mut AppCore,
    recognizer: &mut dyn SpeechRecognizer,
    picker: &mut dyn FilePicker,
) -> String {
    core.announce("Listening for your command.");
    match recognizer.listen() {
        Ok(transcript) => core.handle_command_text(&transcript, picker),
        Err(SpeechError::NotUnderstood) => core.announce("Sorry, I could not understand you."),
        Err(SpeechError::ServiceUnavailable) => {
            core.announce("Request error from the speech recognition service.")
        }
    }
}
