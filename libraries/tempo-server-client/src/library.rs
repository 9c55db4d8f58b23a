//! Catalog operations for the Tempo backend.

use crate::error::{Result, ServerClientError};
use crate::types::{ApiError, Endpoints};
use reqwest::{Client, Response};
use tempo_core::Track;
use tracing::{debug, info};
use url::Url;

/// Library client for the Tempo backend.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    endpoints: &'a Endpoints,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, endpoints: &'a Endpoints) -> Self {
        Self {
            http,
            base_url,
            endpoints,
        }
    }

    /// Fetch the full catalog.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}{}", self.base_url, self.endpoints.songs);
        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let tracks: Vec<Track> = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;

            debug!(tracks = tracks.len(), "Fetched catalog");
            Ok(tracks)
        } else {
            Err(server_error(response).await)
        }
    }

    /// Delete a track by its stored filename.
    pub async fn delete_track(&self, filename: &str) -> Result<()> {
        let url = self.delete_url(filename)?;
        debug!(url = %url, filename = %filename, "Deleting track");

        let response = self.http.delete(url).send().await?;

        if response.status().is_success() {
            info!(filename = %filename, "Track deleted");
            Ok(())
        } else {
            Err(server_error(response).await)
        }
    }

    /// Delete URL with `filename` percent-encoded as the last path segment
    fn delete_url(&self, filename: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, self.endpoints.delete))?;
        url.path_segments_mut()
            .map_err(|()| ServerClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(filename);
        Ok(url)
    }
}

/// Turn a non-2xx response into `ServerError`, preferring the JSON `error` field
pub(crate) async fn server_error(response: Response) -> ServerClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => api_error.error,
        Err(_) => body,
    };

    ServerClientError::ServerError { status, message }
}
