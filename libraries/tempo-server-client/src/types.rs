//! Types for Tempo backend API requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default catalog endpoint
pub const DEFAULT_SONGS_PATH: &str = "/api/songs";
/// Default upload endpoint
pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload";
/// Default delete endpoint (the filename is appended as a path segment)
pub const DEFAULT_DELETE_PATH: &str = "/api/delete";
/// Default location audio files are served from
pub const DEFAULT_MEDIA_PATH: &str = "/static/music";

/// Endpoint paths, relative to the server URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub songs: String,
    pub upload: String,
    pub delete: String,
    pub media: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            songs: DEFAULT_SONGS_PATH.to_string(),
            upload: DEFAULT_UPLOAD_PATH.to_string(),
            delete: DEFAULT_DELETE_PATH.to_string(),
            media: DEFAULT_MEDIA_PATH.to_string(),
        }
    }
}

/// Configuration for connecting to a Tempo backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:5000")
    pub url: String,
    /// Endpoint paths
    pub endpoints: Endpoints,
    /// Per-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            endpoints: Endpoints::default(),
            timeout: None,
        }
    }

    /// Builder-style timeout setter
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder-style endpoints setter
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

// =============================================================================
// Upload Types
// =============================================================================

/// Response from a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    /// Names the files were stored under (may differ from the originals)
    #[serde(default)]
    pub files: Vec<String>,
}

/// Progress information during upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl UploadProgress {
    /// Whole-number percentage sent (0-100)
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }
        ((self.bytes_sent.min(self.bytes_total) * 100) / self.bytes_total) as u8
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// API error response from server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
}
