/// Playlist domain types
use super::ids::{PlaylistId, TrackId};
use super::track::Track;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-named collection of tracks
///
/// Songs are stored by value so a playlist survives the track being removed
/// from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Songs in play order
    #[serde(default)]
    pub songs: Vec<Track>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist created now
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self::with_created(id, name, Utc::now())
    }

    /// Create an empty playlist with a specific creation time
    pub fn with_created(id: PlaylistId, name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            songs: Vec::new(),
            created,
        }
    }

    /// Whether a track with this id is already in the playlist
    pub fn contains(&self, track_id: TrackId) -> bool {
        self.songs.iter().any(|song| song.id == track_id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_creation() {
        let playlist = Playlist::new(PlaylistId::new(7), "My Favorites");

        assert_eq!(playlist.name, "My Favorites");
        assert!(playlist.is_empty());
        assert!(playlist.created <= Utc::now());
    }

    #[test]
    fn serialized_shape() {
        let mut playlist = Playlist::new(PlaylistId::new(1_700_000_000_000), "Favs");
        playlist
            .songs
            .push(Track::new(TrackId::new(2), "B", "b.mp3"));

        let value = serde_json::to_value(&playlist).unwrap();
        assert_eq!(value["id"], 1_700_000_000_000_i64);
        assert_eq!(value["name"], "Favs");
        assert_eq!(value["songs"][0]["filename"], "b.mp3");
        assert!(value["created"].is_string());

        let back: Playlist = serde_json::from_value(value).unwrap();
        assert_eq!(back, playlist);
    }
}
