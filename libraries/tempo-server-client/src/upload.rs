//! Track upload operations for the Tempo backend.

use crate::error::{Result, ServerClientError};
use crate::library::server_error;
use crate::types::{Endpoints, UploadProgress, UploadResponse};
use futures_util::stream;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Bytes handed to the HTTP body per progress step
const CHUNK_SIZE: usize = 64 * 1024;

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ServerClientError::FileNotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track")
            .to_string();

        let bytes = tokio::fs::read(path).await?;

        Ok(Self {
            file_name,
            mime_type: mime_type_for_file(path).to_string(),
            bytes,
        })
    }

    /// Whether the backend should receive this file
    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

/// Upload client for the Tempo backend.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    endpoints: &'a Endpoints,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, endpoints: &'a Endpoints) -> Self {
        Self {
            http,
            base_url,
            endpoints,
        }
    }

    /// Upload every audio file in one multipart request.
    ///
    /// Non-audio files are dropped; if none remain, no request is made.
    /// Progress is reported on `progress` as the body is streamed.
    pub async fn upload_tracks(
        &self,
        files: Vec<UploadFile>,
        progress: Option<UnboundedSender<UploadProgress>>,
    ) -> Result<UploadResponse> {
        let selected = files.len();
        let files: Vec<UploadFile> = files.into_iter().filter(UploadFile::is_audio).collect();

        if files.is_empty() {
            debug!(selected, "Upload selection has no audio files");
            return Err(ServerClientError::NoAudioFiles);
        }

        let bytes_total: u64 = files.iter().map(|f| f.bytes.len() as u64).sum();
        let sent = Arc::new(AtomicU64::new(0));
        let file_count = files.len();

        let mut form = Form::new();
        for file in files {
            let length = file.bytes.len() as u64;
            let part = Part::stream_with_length(
                progress_body(file.bytes, bytes_total, Arc::clone(&sent), progress.clone()),
                length,
            )
            .file_name(file.file_name)
            .mime_str(&file.mime_type)?;

            form = form.part("files", part);
        }

        let url = format!("{}{}", self.base_url, self.endpoints.upload);
        debug!(url = %url, files = file_count, bytes = bytes_total, "Uploading tracks");

        let response = self.http.post(&url).multipart(form).send().await?;

        if response.status().is_success() {
            let upload_response: UploadResponse = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse upload response: {}", e))
            })?;

            info!(
                files = file_count,
                stored = ?upload_response.files,
                "Tracks uploaded"
            );

            Ok(upload_response)
        } else {
            Err(server_error(response).await)
        }
    }
}

/// Chunked body that reports cumulative progress across all parts
fn progress_body(
    bytes: Vec<u8>,
    bytes_total: u64,
    sent: Arc<AtomicU64>,
    progress: Option<UnboundedSender<UploadProgress>>,
) -> Body {
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

    let stream = stream::iter(chunks.into_iter().map(move |chunk| {
        let bytes_sent = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
        if let Some(tx) = &progress {
            // Receiver gone just means nobody is watching
            let _ = tx.send(UploadProgress {
                bytes_sent,
                bytes_total,
            });
        }
        Ok::<_, std::io::Error>(chunk)
    }));

    Body::wrap_stream(stream)
}

/// Get MIME type for audio file.
pub fn mime_type_for_file(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
