/// Storage-specific errors
use tempo_core::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Playlist name empty after trimming
    #[error("Playlist name must not be empty")]
    InvalidName,

    /// Track already present in the playlist
    #[error("Track {track_id} is already in playlist {playlist_id}")]
    DuplicateTrack {
        playlist_id: PlaylistId,
        track_id: TrackId,
    },

    /// Entity not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Key cannot be mapped to a storage location
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure (browser storage, quota, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
