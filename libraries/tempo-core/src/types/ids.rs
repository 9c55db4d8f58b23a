/// ID types for Tempo Player entities
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Assigned by the backend; numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u64);

impl TrackId {
    /// Create a new track ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playlist identifier
///
/// Time-derived: milliseconds since the Unix epoch at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(i64);

impl PlaylistId {
    /// Create a playlist ID from a raw value
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Derive an ID from a creation time
    pub fn from_time(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Get the inner value
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
