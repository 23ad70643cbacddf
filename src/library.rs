use crate::catalog::Catalog;
use crate::playlist::Playlist;
use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The music library: catalog plus playlist, persisted as JSON.
///
/// Playback state is not part of the library; it resets to idle on every
/// startup.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Library {
    pub catalog: Catalog,
    pub playlist: Playlist,
    #[serde(skip)]
    state_path: Option<PathBuf>,
}

impl Library {
    /// In-memory library with no backing file. For testing.
    pub fn new() -> Self {
        Library {
            catalog: Catalog::new(),
            playlist: Playlist::new(),
            state_path: None,
        }
    }

    /// Load library state from JSON, or start fresh if the file is missing
    /// or corrupt. Future `save` calls write back to the same path.
    pub fn load_from(path: &Path) -> Self {
        let mut library = if path.exists() {
            match fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str(&data) {
                    Ok(library) => library,
                    Err(e) => {
                        eprintln!("Warning: corrupt library file, starting fresh: {}", e);
                        Library::new()
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read library file: {}", e);
                    Library::new()
                }
            }
        } else {
            Library::new()
        };
        library.state_path = Some(path.to_path_buf());
        library
    }

    /// Persist current state to JSON. A no-op for in-memory libraries.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = &self.state_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create '{}': {}", parent.display(), e))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| format!("Serialize error: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Write error: {}", e))?;
        Ok(())
    }

    /// Register a file in the catalog and append it to the playlist.
    /// Returns whether the file was newly added; duplicate display names
    /// are skipped without touching the playlist.
    pub fn add_file(&mut self, path: &Path) -> bool {
        let track = Track::from_path(path);
        let display_name = track.display_name.clone();
        if self.catalog.add(track) {
            self.playlist.append(display_name);
            true
        } else {
            false
        }
    }

    /// Add every `.mp3` file directly inside `folder` (non-recursive,
    /// extension matched case-insensitively). Files are added in name
    /// order. Returns the number of newly added tracks.
    pub fn add_folder(&mut self, folder: &Path) -> Result<usize, String> {
        let entries = fs::read_dir(folder)
            .map_err(|e| format!("Cannot read '{}': {}", folder.display(), e))?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_mp3_extension(path))
            .collect();
        files.sort();

        let mut added = 0;
        for file in &files {
            if self.add_file(file) {
                added += 1;
            }
        }
        Ok(added)
    }
}

fn has_mp3_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
