//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Duration not known yet (metadata not loaded)
    #[error("Track duration unknown")]
    DurationUnknown,

    /// Seek target is not a number
    #[error("Seek position must be a finite percentage")]
    InvalidSeek,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Reorder indices outside the queue
    #[error("Cannot move {from} to {to} in a queue of {len}")]
    InvalidReorder { from: usize, to: usize, len: usize },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
