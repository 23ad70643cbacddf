//! Dedicated audio thread with channel-based command dispatch.
//!
//! `RodioBackend` is not `Send`, so it lives on its own thread and the rest
//! of the application talks to it through `AudioThreadBackend` (wraps an
//! `mpsc::Sender`, naturally Send+Sync). `load` round-trips a reply channel
//! so decode failures surface synchronously at the call site; the other
//! commands are fire-and-forget.

use crate::player::{AudioBackend, BackendError, RodioBackend};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

enum AudioCmd {
    Load(PathBuf, mpsc::Sender<Result<(), BackendError>>),
    Play,
    Pause,
    Unpause,
    Stop,
    /// Reply once the current track has finished (or nothing is playing).
    WaitUntilEnd(mpsc::Sender<()>),
    Shutdown,
}

/// Thread-safe handle to the audio thread, usable anywhere an
/// `AudioBackend` is expected.
#[derive(Clone)]
pub struct AudioThreadBackend {
    tx: mpsc::Sender<AudioCmd>,
}

impl AudioThreadBackend {
    /// Block until the loaded track finishes playing. Returns immediately
    /// when nothing is playing or playback is paused.
    pub fn block_until_end(&self) {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self.tx.send(AudioCmd::WaitUntilEnd(reply_tx)).is_ok() {
            let _ = reply_rx.recv();
        }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(AudioCmd::Shutdown);
    }
}

impl AudioBackend for AudioThreadBackend {
    fn load(&mut self, path: &Path) -> Result<(), BackendError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(AudioCmd::Load(path.to_path_buf(), reply_tx))
            .map_err(|_| BackendError("audio thread has shut down".to_string()))?;
        reply_rx
            .recv()
            .map_err(|_| BackendError("audio thread has shut down".to_string()))?
    }

    fn play(&mut self) {
        let _ = self.tx.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.tx.send(AudioCmd::Pause);
    }

    fn unpause(&mut self) {
        let _ = self.tx.send(AudioCmd::Unpause);
    }

    fn stop(&mut self) {
        let _ = self.tx.send(AudioCmd::Stop);
    }
}

/// Spawn the audio thread and return a handle to it.
pub fn spawn_audio_thread() -> AudioThreadBackend {
    let (tx, rx) = mpsc::channel::<AudioCmd>();

    std::thread::Builder::new()
        .name("audio".into())
        .spawn(move || audio_thread_loop(rx))
        .expect("failed to spawn audio thread");

    AudioThreadBackend { tx }
}

/// Main loop for the audio thread. Owns the RodioBackend, created lazily on
/// the first load so machines without an audio device can still run every
/// non-playing operation.
fn audio_thread_loop(rx: mpsc::Receiver<AudioCmd>) {
    let mut backend: Option<RodioBackend> = None;
    let mut waiters: Vec<mpsc::Sender<()>> = Vec::new();

    loop {
        // Poll with a short timeout so pending waiters see track end.
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(cmd) => match cmd {
                AudioCmd::Load(path, reply) => {
                    if backend.is_none() {
                        match RodioBackend::new() {
                            Ok(b) => backend = Some(b),
                            Err(e) => {
                                let _ = reply.send(Err(e));
                                continue;
                            }
                        }
                    }
                    let b = backend.as_mut().expect("backend initialized above");
                    let _ = reply.send(b.load(&path));
                }
                AudioCmd::Play => {
                    if let Some(b) = &mut backend {
                        b.play();
                    }
                }
                AudioCmd::Pause => {
                    if let Some(b) = &mut backend {
                        b.pause();
                    }
                }
                AudioCmd::Unpause => {
                    if let Some(b) = &mut backend {
                        b.unpause();
                    }
                }
                AudioCmd::Stop => {
                    if let Some(b) = &mut backend {
                        b.stop();
                    }
                }
                AudioCmd::WaitUntilEnd(reply) => {
                    if playback_is_over(&backend) {
                        let _ = reply.send(());
                    } else {
                        waiters.push(reply);
                    }
                }
                AudioCmd::Shutdown => {
                    if let Some(b) = &mut backend {
                        b.stop();
                    }
                    break;
                }
            },

            Err(mpsc::RecvTimeoutError::Timeout) => {
                if !waiters.is_empty() && playback_is_over(&backend) {
                    for waiter in waiters.drain(..) {
                        let _ = waiter.send(());
                    }
                }
            }

            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // All senders dropped — shut down
                break;
            }
        }
    }
}

fn playback_is_over(backend: &Option<RodioBackend>) -> bool {
    match backend {
        Some(b) => b.is_empty() || b.is_paused(),
        None => true,
    }
}
