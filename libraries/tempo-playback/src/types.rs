//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Default location of backend audio resources
pub const DEFAULT_MEDIA_ROOT: &str = "/static/music";

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current track
    Idle,

    /// Play requested, not yet confirmed by the media engine
    Loading,

    /// Currently playing
    Playing,

    /// Current track set but not playing (paused, ended, or rejected)
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop entire queue
    All,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off → One → All → Off
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }
}

/// Configuration for playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// URL prefix under which the backend serves audio files
    pub media_root: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            shuffle: false,
            repeat: RepeatMode::Off,
            media_root: DEFAULT_MEDIA_ROOT.to_string(),
        }
    }
}
