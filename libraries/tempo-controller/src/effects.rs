//! Effects the host carries out on the controller's behalf
//!
//! The controller never performs I/O. Every call to `handle` returns the
//! effects to run, in order; completions come back as `UiEvent`s.

use crate::events::SelectedFile;
use crate::notification::Notification;
use crate::view::PlaylistCard;
use serde::{Deserialize, Serialize};
use tempo_core::{PlaylistId, TrackId};
use tempo_playback::MediaCommand;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "view", content = "playlistId", rename_all = "camelCase")]
pub enum View {
    /// Library grid
    #[default]
    Home,
    /// Playlist cards
    Playlists,
    /// Songs of one playlist
    Playlist(PlaylistId),
}

/// Part of the UI that must be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "playlistId", rename_all = "camelCase")]
pub enum RenderTarget {
    Grid,
    Queue,
    NowPlaying,
    PlayerBar,
    Playlists,
    Playlist(PlaylistId),
    Navigation,
    UploadProgress,
}

/// Backend call to make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NetworkRequest {
    /// Reload the catalog; answer with `CatalogLoaded` or `CatalogFailed`
    FetchCatalog,

    /// Upload audio files; answer with `UploadProgress`, then
    /// `UploadSucceeded` or `UploadFailed`
    Upload { files: Vec<SelectedFile> },

    /// Delete a stored track; answer with `DeleteSucceeded` or `DeleteFailed`
    DeleteTrack { track_id: TrackId, filename: String },
}

/// Question the user must answer before a destructive action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub message: String,
}

/// Input that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputField {
    PlaylistName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Effect {
    Render { target: RenderTarget },
    Media { command: MediaCommand },
    Network { request: NetworkRequest },
    Notify { notification: Notification },
    Confirm { request: ConfirmRequest },
    HighlightInvalid { field: InputField },
    /// Let the user pick which playlist to add a track to
    ChoosePlaylist { track_id: TrackId, playlists: Vec<PlaylistCard> },
    /// Save a track's audio resource locally
    Download { url: String, filename: String },
}

impl Effect {
    pub fn render(target: RenderTarget) -> Self {
        Self::Render { target }
    }

    pub fn notify(notification: Notification) -> Self {
        Self::Notify { notification }
    }

    pub fn network(request: NetworkRequest) -> Self {
        Self::Network { request }
    }
}
