//! Tempo Player Core
//!
//! Platform-agnostic domain types for Tempo Player.
//!
//! This crate provides the building blocks shared by the playback engine,
//! the playlist store, the backend client and the controller.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their identifiers
//! - **Artwork**: deterministic placeholder artwork for tracks without cover art
//!
//! # Example
//!
//! ```rust
//! use tempo_core::types::{Playlist, PlaylistId, Track, TrackId};
//!
//! let track = Track::new(TrackId::new(1), "My Favorite Song", "song.mp3")
//!     .with_artist("Some Artist");
//!
//! let mut playlist = Playlist::new(PlaylistId::new(1_700_000_000_000), "Favs");
//! playlist.songs.push(track);
//! assert!(playlist.contains(TrackId::new(1)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod artwork;
pub mod types;

// Re-export commonly used types
pub use artwork::{artwork_or_placeholder, placeholder_artwork, ArtworkSlot};
pub use types::{Playlist, PlaylistId, Track, TrackId, UNKNOWN_ARTIST};
