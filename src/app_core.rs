//! AppCore — the playback controller for voxplay.
//!
//! A single command interface over catalog, playlist, and audio backend.
//! The Tauri GUI, the CLI, and the voice-command flow all drive playback
//! through AppCore methods, so button presses and spoken commands share one
//! code path. Every operation returns the status string it also sends to
//! the notifier; the two sinks always receive the identical text.

use crate::dispatch::{parse_command, Command};
use crate::library::Library;
use crate::notify::Notifier;
use crate::player::AudioBackend;
use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

// ── Log buffer ──────────────────────────────────────────────────────────────

const LOG_BUFFER_MAX: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Bounded in-memory diagnostics log. Engine-failure detail lands here and
/// only here; status messages shown to the user stay generic.
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new() -> Self {
        LogBuffer {
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, level: &str, message: String) {
        self.entries.push_back(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            message,
        });
        while self.entries.len() > LOG_BUFFER_MAX {
            self.entries.pop_front();
        }
    }

    pub fn recent(&self, since_index: usize) -> Vec<LogEntry> {
        self.entries.iter().skip(since_index).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Playback state ──────────────────────────────────────────────────────────

/// Playback state machine. `Idle` is the startup state before any action;
/// `Stopped` is reached only through the stop operation. Both are silent;
/// the distinction only matters for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

// ── External collaborators ──────────────────────────────────────────────────

/// File-selection collaborator: a dialog in the GUI, nothing on the CLI.
/// `None` means the user cancelled (or no picker exists in this context).
pub trait FilePicker {
    fn pick_files(&mut self) -> Option<Vec<PathBuf>>;
    fn pick_folder(&mut self) -> Option<PathBuf>;
}

/// Picker for contexts without a file dialog; always cancels.
pub struct NoPicker;

impl FilePicker for NoPicker {
    fn pick_files(&mut self) -> Option<Vec<PathBuf>> {
        None
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        None
    }
}

// ── Snapshot data ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TransportData {
    pub state: PlaybackState,
    pub current_track: Option<String>,
    pub selected_index: Option<usize>,
    pub track_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackData {
    pub index: usize,
    pub name: String,
    pub title: String,
    pub artist: String,
    pub duration_display: String,
    pub is_current: bool,
}

// ── AppCore ─────────────────────────────────────────────────────────────────

pub struct AppCore {
    pub library: Library,
    pub state: PlaybackState,
    /// Retained across Stopped for label display.
    pub current_track: Option<String>,
    pub logs: LogBuffer,
    backend: Box<dyn AudioBackend + Send>,
    notifier: Box<dyn Notifier + Send>,
}

impl AppCore {
    /// Create an AppCore backed by the library state file at `state_path`.
    /// Playback always starts idle regardless of what was persisted.
    pub fn new(
        state_path: &Path,
        backend: Box<dyn AudioBackend + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> Self {
        AppCore {
            library: Library::load_from(state_path),
            state: PlaybackState::Idle,
            current_track: None,
            logs: LogBuffer::new(),
            backend,
            notifier,
        }
    }

    /// Create an AppCore with a fresh in-memory library. For testing.
    pub fn new_test(
        backend: Box<dyn AudioBackend + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> Self {
        AppCore {
            library: Library::new(),
            state: PlaybackState::Idle,
            current_track: None,
            logs: LogBuffer::new(),
            backend,
            notifier,
        }
    }

    /// Send a status line to both sinks (label text and speech) and return
    /// it. Also records it in the log.
    pub fn announce(&mut self, message: impl Into<String>) -> String {
        let message = message.into();
        self.logs.push("info", message.clone());
        self.notifier.notify(&message);
        message
    }

    // ── Snapshots (read-only) ───────────────────────────────────────────

    pub fn transport(&self) -> TransportData {
        TransportData {
            state: self.state,
            current_track: self.current_track.clone(),
            selected_index: self.library.playlist.active,
            track_count: self.library.playlist.len(),
        }
    }

    pub fn tracks(&self) -> Vec<TrackData> {
        self.library
            .playlist
            .entries
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let (title, artist, duration_display) =
                    match self.library.catalog.resolve(name) {
                        Some(track) => (
                            track.title.clone(),
                            track.artist.clone(),
                            track.duration_display(),
                        ),
                        None => (name.clone(), "Unknown".to_string(), "0:00".to_string()),
                    };
                TrackData {
                    index,
                    name: name.clone(),
                    title,
                    artist,
                    duration_display,
                    is_current: self.current_track.as_deref() == Some(name.as_str()),
                }
            })
            .collect()
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Set the playlist selection, e.g. from a listbox click. Returns
    /// whether the index was valid. No status is emitted.
    pub fn select(&mut self, index: usize) -> bool {
        if self.library.playlist.select(index).is_ok() {
            self.save_library();
            true
        } else {
            false
        }
    }

    // ── Playback operations ─────────────────────────────────────────────

    /// Play the selected track. With no selection, the state machine is
    /// left untouched and the user is asked to select a song.
    pub fn play_selected(&mut self) -> String {
        let Some(name) = self.library.playlist.selected().map(str::to_string) else {
            return self.announce("Please select a song to play.");
        };
        match self.start_track(&name) {
            Ok(()) => self.announce(format!("Playing: {}", name)),
            Err(detail) => {
                self.logs.push("error", detail);
                self.announce("Error playing the selected song.")
            }
        }
    }

    /// Select `index` and play it. An out-of-range index is a silent no-op:
    /// no status, no notifier call, selection unchanged.
    pub fn play_at(&mut self, index: usize) -> Option<String> {
        if !self.select(index) {
            return None;
        }
        Some(self.play_selected())
    }

    /// Advance the selection by one with wraparound and play it. Requires
    /// an existing selection.
    pub fn play_next(&mut self) -> String {
        if self.library.playlist.advance(1).is_ok() {
            self.save_library();
            self.play_selected()
        } else {
            self.announce("No next song available.")
        }
    }

    /// Move the selection back by one with wraparound and play it.
    pub fn play_previous(&mut self) -> String {
        if self.library.playlist.advance(-1).is_ok() {
            self.save_library();
            self.play_selected()
        } else {
            self.announce("No previous song available.")
        }
    }

    /// Pause playback. The engine call is issued unconditionally; only a
    /// Playing state transitions to Paused.
    pub fn pause(&mut self) -> String {
        self.backend.pause();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        self.announce("Music paused")
    }

    /// Resume playback from any state.
    pub fn resume(&mut self) -> String {
        self.backend.unpause();
        self.state = PlaybackState::Playing;
        match self.current_track.clone() {
            Some(name) => self.announce(format!("Resumed: {}", name)),
            None => self.announce("Resumed"),
        }
    }

    /// Stop playback and clear the selection highlight. The last-played
    /// track name is retained for display.
    pub fn stop(&mut self) -> String {
        self.backend.stop();
        self.state = PlaybackState::Stopped;
        self.library.playlist.clear_selection();
        self.save_library();
        self.announce("Music stopped")
    }

    /// Play a uniformly random playlist entry. Repeats are allowed,
    /// including the currently playing track.
    pub fn shuffle(&mut self) -> String {
        let index = match self.library.playlist.random_entry() {
            Ok(index) => index,
            Err(_) => return self.announce("No songs to shuffle."),
        };
        let name = self.library.playlist.entries[index].clone();
        match self.start_track(&name) {
            Ok(()) => {
                // Highlight the chosen entry only once it is audible
                let _ = self.library.playlist.select(index);
                self.save_library();
                self.announce(format!("Playing: {}", name))
            }
            Err(detail) => {
                self.logs.push("error", detail);
                self.announce("Error shuffling songs.")
            }
        }
    }

    /// Resolve, load, and start a track. On success the state machine moves
    /// to Playing and the track becomes current. On failure nothing
    /// changes; the returned detail is for the log only.
    fn start_track(&mut self, name: &str) -> Result<(), String> {
        let path = match self.library.catalog.resolve(name) {
            Some(track) => track.path.clone(),
            None => return Err(format!("'{}' is not in the catalog", name)),
        };
        self.backend
            .load(&path)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        self.backend.play();
        self.state = PlaybackState::Playing;
        self.current_track = Some(name.to_string());
        Ok(())
    }

    // ── Adding music ────────────────────────────────────────────────────

    /// Add individual files (already filtered to MP3 by the picker).
    pub fn add_files(&mut self, paths: &[PathBuf]) -> String {
        if paths.is_empty() {
            return self.announce("No files or folder selected.");
        }
        for path in paths {
            self.library.add_file(path);
        }
        self.save_library();
        self.announce("Music added successfully.")
    }

    /// Add every MP3 directly inside a folder.
    pub fn add_folder(&mut self, folder: &Path) -> String {
        match self.library.add_folder(folder) {
            Ok(_) => {
                self.save_library();
                self.announce("Folder music added successfully.")
            }
            Err(detail) => {
                self.logs.push("error", detail);
                self.announce("No files or folder selected.")
            }
        }
    }

    /// Interactive add flow: offer a multi-file pick, fall back to a folder
    /// pick, report cancellation.
    pub fn add_music(&mut self, picker: &mut dyn FilePicker) -> String {
        if let Some(files) = picker.pick_files() {
            if !files.is_empty() {
                return self.add_files(&files);
            }
        }
        if let Some(folder) = picker.pick_folder() {
            return self.add_folder(&folder);
        }
        self.announce("No files or folder selected.")
    }

    fn save_library(&mut self) {
        if let Err(e) = self.library.save() {
            self.logs.push("error", e);
        }
    }

    // ── Free-text dispatch ──────────────────────────────────────────────

    /// Run the operation matching a free-text command, e.g. a voice
    /// transcript. The text is lowercased before keyword matching.
    pub fn handle_command_text(&mut self, text: &str, picker: &mut dyn FilePicker) -> String {
        match parse_command(&text.to_lowercase()) {
            Ok(Command::Play) => self.play_selected(),
            Ok(Command::Pause) => self.pause(),
            Ok(Command::Resume) => self.resume(),
            Ok(Command::Stop) => self.stop(),
            Ok(Command::Shuffle) => self.shuffle(),
            Ok(Command::Add) => self.add_music(picker),
            Ok(Command::Next) => self.play_next(),
            Ok(Command::Previous) => self.play_previous(),
            Err(_) => self.announce("Command not recognized."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;
    use crate::player::BackendError;

    /// Backend that accepts everything without touching audio hardware.
    struct NoopBackend;

    impl AudioBackend for NoopBackend {
        fn load(&mut self, _path: &Path) -> Result<(), BackendError> {
            Ok(())
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn unpause(&mut self) {}
        fn stop(&mut self) {}
    }

    fn make_core() -> AppCore {
        AppCore::new_test(Box::new(NoopBackend), Box::new(NullNotifier))
    }

    fn core_with_tracks(names: &[&str]) -> AppCore {
        let mut core = make_core();
        for name in names {
            core.library.add_file(Path::new(&format!("/music/{}", name)));
        }
        core
    }

    #[test]
    fn starts_idle_with_no_current_track() {
        let core = make_core();
        assert_eq!(core.state, PlaybackState::Idle);
        assert!(core.current_track.is_none());
    }

    #[test]
    fn play_selected_without_selection_keeps_state() {
        let mut core = core_with_tracks(&["a.mp3"]);
        let status = core.play_selected();
        assert_eq!(status, "Please select a song to play.");
        assert_eq!(core.state, PlaybackState::Idle);
        assert!(core.current_track.is_none());
    }

    #[test]
    fn play_at_sets_current_track() {
        let mut core = core_with_tracks(&["a.mp3", "b.mp3"]);
        let status = core.play_at(1).unwrap();
        assert_eq!(status, "Playing: b.mp3");
        assert_eq!(core.state, PlaybackState::Playing);
        assert_eq!(core.current_track.as_deref(), Some("b.mp3"));
    }

    #[test]
    fn play_at_out_of_range_is_silent() {
        let mut core = core_with_tracks(&["a.mp3"]);
        assert!(core.play_at(5).is_none());
        assert_eq!(core.state, PlaybackState::Idle);
        assert!(core.library.playlist.active.is_none());
        assert!(core.logs.is_empty());
    }

    #[test]
    fn pause_only_transitions_from_playing() {
        let mut core = core_with_tracks(&["a.mp3"]);
        assert_eq!(core.pause(), "Music paused");
        assert_eq!(core.state, PlaybackState::Idle);

        core.play_at(0);
        core.pause();
        assert_eq!(core.state, PlaybackState::Paused);
    }

    #[test]
    fn resume_reports_current_track() {
        let mut core = core_with_tracks(&["a.mp3"]);
        core.play_at(0);
        core.pause();
        assert_eq!(core.resume(), "Resumed: a.mp3");
        assert_eq!(core.state, PlaybackState::Playing);
    }

    #[test]
    fn resume_with_no_track_is_bare() {
        let mut core = make_core();
        assert_eq!(core.resume(), "Resumed");
        assert_eq!(core.state, PlaybackState::Playing);
    }

    #[test]
    fn stop_clears_selection_but_keeps_track_name() {
        let mut core = core_with_tracks(&["a.mp3"]);
        core.play_at(0);
        assert_eq!(core.stop(), "Music stopped");
        assert_eq!(core.state, PlaybackState::Stopped);
        assert!(core.library.playlist.active.is_none());
        assert_eq!(core.current_track.as_deref(), Some("a.mp3"));
    }

    #[test]
    fn next_after_stop_has_nothing_to_advance_from() {
        let mut core = core_with_tracks(&["a.mp3", "b.mp3"]);
        core.play_at(0);
        core.stop();
        assert_eq!(core.play_next(), "No next song available.");
        assert_eq!(core.play_previous(), "No previous song available.");
    }

    #[test]
    fn shuffle_empty_playlist_keeps_state() {
        let mut core = make_core();
        assert_eq!(core.shuffle(), "No songs to shuffle.");
        assert_eq!(core.state, PlaybackState::Idle);
    }

    #[test]
    fn shuffle_selects_what_it_plays() {
        let mut core = core_with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
        let status = core.shuffle();
        assert!(status.starts_with("Playing: "));
        assert_eq!(core.state, PlaybackState::Playing);
        let selected = core.library.playlist.selected().unwrap();
        assert_eq!(core.current_track.as_deref(), Some(selected));
    }

    #[test]
    fn add_files_empty_slice_reports_nothing_selected() {
        let mut core = make_core();
        assert_eq!(core.add_files(&[]), "No files or folder selected.");
    }

    #[test]
    fn add_is_idempotent_on_display_name() {
        let mut core = make_core();
        core.add_files(&[PathBuf::from("/music/a.mp3")]);
        core.add_files(&[PathBuf::from("/elsewhere/a.mp3")]);
        assert_eq!(core.library.playlist.len(), 1);
        assert_eq!(core.library.catalog.len(), 1);
    }

    #[test]
    fn add_music_with_no_picker_cancels() {
        let mut core = make_core();
        assert_eq!(
            core.add_music(&mut NoPicker),
            "No files or folder selected."
        );
    }

    #[test]
    fn command_text_is_lowercased_before_matching() {
        let mut core = core_with_tracks(&["a.mp3"]);
        core.select(0);
        let status = core.handle_command_text("PLAY the song", &mut NoPicker);
        assert_eq!(status, "Playing: a.mp3");
    }

    #[test]
    fn unrecognized_command_text() {
        let mut core = make_core();
        let status = core.handle_command_text("what time is it", &mut NoPicker);
        assert_eq!(status, "Command not recognized.");
    }

    #[test]
    fn tracks_snapshot_marks_current() {
        let mut core = core_with_tracks(&["a.mp3", "b.mp3"]);
        core.play_at(1);
        let tracks = core.tracks();
        assert_eq!(tracks.len(), 2);
        assert!(!tracks[0].is_current);
        assert!(tracks[1].is_current);
        assert_eq!(tracks[1].name, "b.mp3");
    }

    #[test]
    fn log_buffer_caps_entries() {
        let mut logs = LogBuffer::new();
        for i in 0..(LOG_BUFFER_MAX + 25) {
            logs.push("info", format!("entry {}", i));
        }
        assert_eq!(logs.len(), LOG_BUFFER_MAX);
        assert_eq!(logs.recent(0)[0].message, "entry 25");
    }
}
