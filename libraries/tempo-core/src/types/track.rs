//! Track domain type

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// Label shown when a track has no artist
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// A track as listed by the backend catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Name of the audio resource stored by the backend
    pub filename: String,

    /// Cover art reference (URL or data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Length in seconds, when the backend could read it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Track {
    /// Create a track with only the required fields
    pub fn new(id: TrackId, title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: None,
            filename: filename.into(),
            artwork: None,
            album: None,
            duration: None,
        }
    }

    /// Builder-style artist setter
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Builder-style artwork setter
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Artist name for display
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }

    /// Case-insensitive match of `needle` (already lowercased) against title or artist
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .artist
                .as_deref()
                .is_some_and(|artist| artist.to_lowercase().contains(needle))
    }
}
