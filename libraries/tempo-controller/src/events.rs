//! Events fed into the controller
//!
//! User input and asynchronous completions share one type so the host can
//! run a single event loop.

use crate::effects::View;
use crate::input::Key;
use serde::{Deserialize, Serialize};
use tempo_core::{PlaylistId, Track, TrackId};

/// A file the user picked for upload
///
/// `location` is host-specific (a path, a blob handle); the controller only
/// looks at the media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub location: String,
}

impl SelectedFile {
    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UiEvent {
    // ===== Playback =====
    /// Grid card clicked
    PlayTrack { track_id: TrackId },
    /// Queue row clicked
    PlayQueueIndex { index: usize },
    TogglePlay,
    Next,
    Previous,
    /// Progress bar clicked (0-100)
    Seek { percent: f64 },
    SetVolume { level: i32 },
    ToggleShuffle,
    ToggleRepeat,
    KeyPressed { key: Key, in_text_input: bool },
    /// Queue row dragged from `from` and dropped at `to`
    QueueDrop { from: usize, to: usize },

    // ===== Library =====
    Search { query: String },
    UploadSelected { files: Vec<SelectedFile> },
    DeleteTrackRequested { track_id: TrackId },
    DownloadTrack { track_id: TrackId },

    // ===== Playlists =====
    CreatePlaylist { name: String },
    AddToPlaylistRequested { track_id: TrackId },
    AddToPlaylist { playlist_id: PlaylistId, track_id: TrackId },
    RemoveFromPlaylist { playlist_id: PlaylistId, index: usize },
    DeletePlaylistRequested { playlist_id: PlaylistId },
    /// Play a playlist starting at `start`
    PlayPlaylist { playlist_id: PlaylistId, start: usize },
    OpenPlaylist { playlist_id: PlaylistId },
    ShowView { view: View },

    /// Answer to the last `Confirm` effect
    Confirmed { accepted: bool },

    // ===== Network completions =====
    CatalogLoaded { tracks: Vec<Track> },
    CatalogFailed { message: String },
    UploadProgress { percent: u8 },
    UploadSucceeded { files: usize },
    UploadFailed { message: String },
    DeleteSucceeded { track_id: TrackId },
    DeleteFailed { track_id: TrackId, message: Option<String> },

    // ===== Media engine callbacks =====
    PlayStarted,
    PlayRejected { reason: String },
    MetadataLoaded { duration_secs: f64 },
    TimeUpdate { position_secs: f64 },
    TrackEnded,
}
