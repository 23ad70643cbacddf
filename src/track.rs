use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A named reference to an audio file. Identity within the catalog is
/// `display_name` (the file name); title/artist/duration are display
/// metadata read from tags when available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub display_name: String,
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl Track {
    /// Build a Track from a file path. Never fails: tag metadata is read
    /// opportunistically, falling back to the file stem and "Unknown" when
    /// the file is missing, unreadable, or untagged.
    pub fn from_path(path: &Path) -> Self {
        let display_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        match lofty::read_from_path(path) {
            Ok(tagged_file) => {
                let duration = tagged_file.properties().duration();
                let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
                let title = tag
                    .and_then(|t| t.title().map(|s| s.to_string()))
                    .unwrap_or(stem);
                let artist = tag
                    .and_then(|t| t.artist().map(|s| s.to_string()))
                    .unwrap_or_else(|| "Unknown".to_string());
                Track {
                    display_name,
                    path: path.to_path_buf(),
                    title,
                    artist,
                    duration,
                }
            }
            Err(_) => Track {
                display_name,
                path: path.to_path_buf(),
                title: stem,
                artist: "Unknown".to_string(),
                duration: Duration::ZERO,
            },
        }
    }

    /// Format duration as MM:SS.
    pub fn duration_display(&self) -> String {
        let secs = self.duration.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(dur: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (dur.as_secs(), dur.subsec_nanos()).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let (secs, nanos) = <(u64, u32)>::deserialize(d)?;
        Ok(Duration::new(secs, nanos))
    }
}
