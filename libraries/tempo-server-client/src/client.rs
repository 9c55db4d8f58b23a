//! Main Tempo backend client.

use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::types::{Endpoints, ServerConfig, UploadProgress, UploadResponse};
use crate::upload::{UploadClient, UploadFile};
use reqwest::Client;
use tempo_core::Track;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use url::Url;

/// Main client for interacting with a Tempo backend.
///
/// The backend is unauthenticated; the client only carries the base URL,
/// the endpoint paths and a shared HTTP connection pool.
///
/// # Example
///
/// ```ignore
/// use tempo_server_client::{ServerConfig, TempoServerClient};
///
/// let client = TempoServerClient::new(ServerConfig::new("http://localhost:5000"))?;
/// let tracks = client.list_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct TempoServerClient {
    http: Client,
    url: String,
    endpoints: Endpoints,
}

impl TempoServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url)?;

        let mut builder = Client::builder().user_agent(format!(
            "TempoPlayer/{}",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(url = %url, timeout = ?config.timeout, "Created backend client");

        Ok(Self {
            http,
            url,
            endpoints: config.endpoints,
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Get a library client for catalog operations.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.url, &self.endpoints)
    }

    /// Get an upload client for uploading tracks.
    pub fn upload(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.url, &self.endpoints)
    }

    /// Fetch the full catalog.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        self.library().list_tracks().await
    }

    /// Upload audio files, dropping anything that is not `audio/*`.
    pub async fn upload_tracks(&self, files: Vec<UploadFile>) -> Result<UploadResponse> {
        self.upload().upload_tracks(files, None).await
    }

    /// Upload audio files, reporting progress on `progress`.
    pub async fn upload_tracks_with_progress(
        &self,
        files: Vec<UploadFile>,
        progress: UnboundedSender<UploadProgress>,
    ) -> Result<UploadResponse> {
        self.upload().upload_tracks(files, Some(progress)).await
    }

    /// Delete a track by its stored filename.
    pub async fn delete_track(&self, filename: &str) -> Result<()> {
        self.library().delete_track(filename).await
    }

    /// Media root the audio files are served from
    pub fn media_root(&self) -> String {
        format!("{}{}", self.url, self.endpoints.media)
    }

    /// Absolute URL of a track's audio resource.
    pub fn media_url(&self, filename: &str) -> String {
        format!("{}/{}", self.media_root(), filename)
    }
}
