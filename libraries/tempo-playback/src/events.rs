//! Playback events and media commands
//!
//! The manager never touches the media engine directly. Each operation
//! queues:
//! - `MediaCommand`s for the engine (load, play, pause, seek, volume)
//! - `PlaybackEvent`s for the UI (state, track, queue, volume, modes)
//!
//! Callers drain both after every call.

use crate::types::{PlaybackState, RepeatMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tempo_core::TrackId;

/// Instruction for the external media engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MediaCommand {
    /// Point the engine at a new resource and start loading it
    Load { url: String },

    /// Start or resume playback; the engine answers with
    /// `on_play_started` or `on_play_rejected`
    Play,

    /// Pause playback
    Pause,

    /// Jump to a position in the loaded resource
    Seek { position: Duration },

    /// Linear output gain (0.0-1.0)
    SetVolume { gain: f32 },
}

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// Current track changed
    TrackChanged {
        /// ID of the new (current) track, `None` when playback was reset
        track_id: Option<TrackId>,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue contents or order changed
    QueueChanged { length: usize },

    /// Volume changed
    VolumeChanged { level: u8 },

    /// Shuffle or repeat toggled
    ModesChanged { shuffle: bool, repeat: RepeatMode },

    /// Position/duration reported by the media engine
    PositionUpdate {
        position_ms: u64,
        duration_ms: Option<u64>,
    },

    /// The media engine refused to play
    Error { message: String },
}
