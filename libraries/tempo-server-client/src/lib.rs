//! Tempo Player Server Client
//!
//! HTTP client library for the Tempo backend API.
//!
//! # Features
//!
//! - **Catalog**: Fetch the track list
//! - **Upload**: Multipart upload of audio files with progress reporting
//! - **Delete**: Remove a stored track by filename
//!
//! # Example
//!
//! ```ignore
//! use tempo_server_client::{ServerConfig, TempoServerClient, UploadFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TempoServerClient::new(ServerConfig::new("http://localhost:5000"))?;
//!
//!     let file = UploadFile::from_path("song.mp3".as_ref()).await?;
//!     let response = client.upload_tracks(vec![file]).await?;
//!     println!("{}", response.message);
//!
//!     for track in client.list_tracks().await? {
//!         println!("{} - {}", track.display_artist(), track.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod library;
mod types;
mod upload;

// Re-export main types
pub use client::TempoServerClient;
pub use error::{Result, ServerClientError};
pub use types::{
    ApiError, Endpoints, ServerConfig, UploadProgress, UploadResponse, DEFAULT_DELETE_PATH,
    DEFAULT_MEDIA_PATH, DEFAULT_SONGS_PATH, DEFAULT_UPLOAD_PATH,
};
pub use upload::{mime_type_for_file, UploadFile};

// Re-export sub-clients for direct use if needed
pub use library::LibraryClient;
pub use upload::UploadClient;
