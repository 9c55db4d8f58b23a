//! Controller errors
//!
//! Only construction can fail; once running, every failure becomes a
//! notification effect.

use tempo_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    /// Persisted playlists could not be loaded
    #[error("Failed to load playlists: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
