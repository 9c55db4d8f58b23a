//! Tempo Player Storage
//!
//! Client-side persistence for Tempo Player.
//!
//! # Architecture
//!
//! - **Key-value layer**: [`KeyValueStore`] abstracts the host's string store
//!   (a data directory on desktop, browser storage when embedded)
//! - **Playlists**: [`PlaylistStore`] keeps the user's playlists in memory and
//!   writes the whole set through on every mutation
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Track, TrackId};
//! use tempo_storage::{MemoryKeyValueStore, PlaylistStore};
//!
//! let mut playlists = PlaylistStore::load(MemoryKeyValueStore::new()).unwrap();
//! let id = playlists.create("Favs").unwrap().id;
//!
//! playlists
//!     .add_track(id, Track::new(TrackId::new(2), "B", "b.mp3"))
//!     .unwrap();
//! assert_eq!(playlists.songs_for_playback(id).unwrap().len(), 1);
//! ```

mod error;
pub mod kv;
pub mod playlists;

pub use error::{Result, StorageError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use playlists::{PlaylistStore, PLAYLISTS_KEY};
