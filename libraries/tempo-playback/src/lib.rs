//! Tempo Player - Playback Management
//!
//! Platform-agnostic queue and playback state machine for Tempo Player.
//!
//! This crate provides:
//! - Play queue with a cursor that survives drag reordering and deletion
//! - Wrapping next/previous navigation
//! - Shuffle (random pick, repeats allowed) and repeat modes (Off, One, All)
//! - Seek by percentage once the track duration is known
//! - Volume control (0-100%)
//!
//! # Architecture
//!
//! `tempo-playback` never touches audio output. Every operation queues
//! [`MediaCommand`]s for the platform media engine and [`PlaybackEvent`]s for
//! the UI; the host drains both and reports engine progress back through
//! the `on_*` callbacks.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tempo_core::{Track, TrackId};
//! use tempo_playback::{MediaCommand, PlaybackManager, PlaybackState};
//!
//! let mut manager = PlaybackManager::default();
//! manager.replace_queue(vec![
//!     Track::new(TrackId::new(1), "First", "first.mp3"),
//!     Track::new(TrackId::new(2), "Second", "second.mp3"),
//! ]);
//!
//! manager.play_at(1).unwrap();
//! assert_eq!(manager.get_state(), PlaybackState::Loading);
//! assert_eq!(
//!     manager.drain_commands(),
//!     vec![
//!         MediaCommand::Load { url: "/static/music/second.mp3".to_string() },
//!         MediaCommand::Play,
//!     ]
//! );
//!
//! // The media engine confirms asynchronously
//! manager.on_play_started();
//! assert!(manager.is_playing());
//!
//! // Next wraps around the end of the queue
//! manager.next().unwrap();
//! assert_eq!(manager.cursor(), 0);
//! ```
//!
//! # Example: Drag Reorder
//!
//! ```rust
//! use tempo_core::{Track, TrackId};
//! use tempo_playback::PlaybackManager;
//!
//! let mut manager = PlaybackManager::default();
//! manager.replace_queue(
//!     (0..5).map(|i| Track::new(TrackId::new(i), format!("T{i}"), format!("{i}.mp3"))).collect(),
//! );
//! manager.play_at(2).unwrap();
//!
//! manager.reorder_queue(1, 3).unwrap();
//! // Still on the same track, now one slot earlier
//! assert_eq!(manager.cursor(), 1);
//! assert_eq!(manager.get_current_track().unwrap().id, TrackId::new(2));
//! ```

mod error;
pub mod events;
mod manager;
pub mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{MediaCommand, PlaybackEvent};
pub use manager::PlaybackManager;
pub use queue::{Queue, Removal};
pub use shuffle::random_index;
pub use types::{PlaybackConfig, PlaybackState, RepeatMode, DEFAULT_MEDIA_ROOT};
pub use volume::Volume;
