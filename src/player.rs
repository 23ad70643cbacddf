use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Uniform playback-engine failure. Device, open, and decode errors all
/// surface as this one kind; the detail string is for diagnostics only.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// The playback-engine seam. The controller drives whatever sits behind it
/// (rodio in production, a scripted mock in tests) through these five calls
/// and treats any failure uniformly.
pub trait AudioBackend {
    /// Prepare a file for playback, replacing whatever was loaded before.
    /// Playback does not start until `play`.
    fn load(&mut self, path: &Path) -> Result<(), BackendError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
}

/// Runtime audio player wrapping rodio. Not serializable — created fresh
/// per session, and not `Send`: it must stay on the thread that created it.
pub struct RodioBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioBackend {
    /// Initialize audio output and create a playback sink.
    pub fn new() -> Result<Self, BackendError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| BackendError(format!("Failed to open audio output: {}", e)))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| BackendError(format!("Failed to create audio sink: {}", e)))?;
        Ok(RodioBackend {
            _stream: stream,
            handle,
            sink,
        })
    }

    /// True when the sink has finished all queued audio.
    pub fn is_empty(&self) -> bool {
        self.sink.empty()
    }

    /// Returns true if the sink is paused.
    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<(), BackendError> {
        let file = File::open(path)
            .map_err(|e| BackendError(format!("Cannot open '{}': {}", path.display(), e)))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| BackendError(format!("Cannot decode '{}': {}", path.display(), e)))?;

        // Replace the sink so any previously queued audio is dropped.
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| BackendError(format!("Failed to create audio sink: {}", e)))?;
        sink.pause();
        sink.append(source);
        self.sink.stop();
        self.sink = sink;
        Ok(())
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn unpause(&mut self) {
        self.sink.play();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}
