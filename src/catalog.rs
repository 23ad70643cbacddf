use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deduplicated registry mapping a display name to its track.
///
/// First add wins: a second track with the same display name is skipped
/// silently and the original path is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    tracks: HashMap<String, Track>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            tracks: HashMap::new(),
        }
    }

    /// Insert a track unless its display name is already registered.
    /// Returns whether the track was inserted. Never fails.
    pub fn add(&mut self, track: Track) -> bool {
        if self.tracks.contains_key(&track.display_name) {
            return false;
        }
        self.tracks.insert(track.display_name.clone(), track);
        true
    }

    /// Look up a track by display name.
    pub fn resolve(&self, display_name: &str) -> Option<&Track> {
        self.tracks.get(display_name)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn make_track(name: &str, path: &str) -> Track {
        Track {
            display_name: name.to_string(),
            path: PathBuf::from(path),
            title: name.to_string(),
            artist: "X".to_string(),
            duration: Duration::from_secs(60),
        }
    }

    #[test]
    fn add_and_resolve() {
        let mut catalog = Catalog::new();
        assert!(catalog.add(make_track("a.mp3", "/music/a.mp3")));
        let track = catalog.resolve("a.mp3").unwrap();
        assert_eq!(track.path, PathBuf::from("/music/a.mp3"));
    }

    #[test]
    fn duplicate_add_keeps_first_path() {
        let mut catalog = Catalog::new();
        assert!(catalog.add(make_track("a.mp3", "/first/a.mp3")));
        assert!(!catalog.add(make_track("a.mp3", "/second/a.mp3")));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.resolve("a.mp3").unwrap().path,
            PathBuf::from("/first/a.mp3")
        );
    }

    #[test]
    fn resolve_unknown_returns_none() {
        let catalog = Catalog::new();
        assert!(catalog.resolve("ghost.mp3").is_none());
        assert!(catalog.is_empty());
    }
}
