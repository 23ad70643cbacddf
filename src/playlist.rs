use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("the playlist is empty")]
    EmptyPlaylist,
    #[error("no track is selected")]
    NoSelection,
    #[error("index {index} out of range ({len} tracks)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered sequence of catalog display names with one optional active
/// selection. The active index, when present, is always `< entries.len()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub entries: Vec<String>,
    pub active: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Playlist {
            entries: Vec::new(),
            active: None,
        }
    }

    /// Append a display name to the end of the playlist.
    pub fn append(&mut self, display_name: String) {
        self.entries.push(display_name);
    }

    /// Set the active selection. Fails with `OutOfRange` for an invalid index.
    pub fn select(&mut self, index: usize) -> Result<(), PlaylistError> {
        if index >= self.entries.len() {
            return Err(PlaylistError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }

    /// Drop the active selection.
    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// The currently selected display name, if any.
    pub fn selected(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    /// Move the selection by `delta` with wraparound and return the new
    /// name. Relative moves require an existing selection: with no active
    /// index this fails with `NoSelection` rather than starting from zero.
    pub fn advance(&mut self, delta: isize) -> Result<&str, PlaylistError> {
        if self.entries.is_empty() {
            return Err(PlaylistError::EmptyPlaylist);
        }
        let current = self.active.ok_or(PlaylistError::NoSelection)?;
        let len = self.entries.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.active = Some(next);
        Ok(&self.entries[next])
    }

    /// Pick a uniformly random entry index. Repeats are allowed, including
    /// the currently selected entry.
    pub fn random_entry(&self) -> Result<usize, PlaylistError> {
        if self.entries.is_empty() {
            return Err(PlaylistError::EmptyPlaylist);
        }
        Ok(fastrand::usize(..self.entries.len()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist_of(names: &[&str]) -> Playlist {
        let mut pl = Playlist::new();
        for name in names {
            pl.append(name.to_string());
        }
        pl
    }

    #[test]
    fn new_playlist_has_no_selection() {
        let pl = Playlist::new();
        assert!(pl.is_empty());
        assert!(pl.active.is_none());
        assert!(pl.selected().is_none());
    }

    #[test]
    fn select_and_read_back() {
        let mut pl = playlist_of(&["a.mp3", "b.mp3"]);
        pl.select(1).unwrap();
        assert_eq!(pl.selected(), Some("b.mp3"));
    }

    #[test]
    fn select_out_of_range_errors() {
        let mut pl = playlist_of(&["a.mp3"]);
        assert_eq!(
            pl.select(3),
            Err(PlaylistError::OutOfRange { index: 3, len: 1 })
        );
        assert!(pl.active.is_none());
    }

    #[test]
    fn advance_wraps_forward() {
        let mut pl = playlist_of(&["a.mp3", "b.mp3", "c.mp3"]);
        pl.select(2).unwrap();
        assert_eq!(pl.advance(1).unwrap(), "a.mp3");
        assert_eq!(pl.active, Some(0));
    }

    #[test]
    fn advance_wraps_backward() {
        let mut pl = playlist_of(&["a.mp3", "b.mp3", "c.mp3"]);
        pl.select(0).unwrap();
        assert_eq!(pl.advance(-1).unwrap(), "c.mp3");
        assert_eq!(pl.active, Some(2));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut pl = playlist_of(&["a.mp3", "b.mp3", "c.mp3"]);
        pl.select(1).unwrap();
        for _ in 0..pl.len() {
            pl.advance(1).unwrap();
        }
        assert_eq!(pl.active, Some(1));
    }

    #[test]
    fn advance_on_empty_playlist_errors() {
        let mut pl = Playlist::new();
        assert_eq!(pl.advance(1), Err(PlaylistError::EmptyPlaylist));
    }

    #[test]
    fn advance_without_selection_errors() {
        let mut pl = playlist_of(&["a.mp3", "b.mp3"]);
        assert_eq!(pl.advance(1), Err(PlaylistError::NoSelection));
        assert_eq!(pl.advance(-1), Err(PlaylistError::NoSelection));
        assert!(pl.active.is_none());
    }

    #[test]
    fn clear_selection_resets_active() {
        let mut pl = playlist_of(&["a.mp3"]);
        pl.select(0).unwrap();
        pl.clear_selection();
        assert!(pl.selected().is_none());
    }

    #[test]
    fn random_entry_is_in_range() {
        let pl = playlist_of(&["a.mp3", "b.mp3", "c.mp3"]);
        for _ in 0..50 {
            assert!(pl.random_entry().unwrap() < 3);
        }
    }

    #[test]
    fn random_entry_on_empty_playlist_errors() {
        let pl = Playlist::new();
        assert_eq!(pl.random_entry(), Err(PlaylistError::EmptyPlaylist));
    }
}
