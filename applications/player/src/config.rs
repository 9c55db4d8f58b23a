/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempo_server_client::{Endpoints, ServerConfig};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "tempo";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory holding `playlists.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub initial_volume: u8,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tempo.toml` in the working
    /// directory is used when present. `TEMPO_`-prefixed variables override
    /// the file, with `__` between sections (`TEMPO_SERVER__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, server: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(url) = server {
            self.server.url = url;
        }
        if let Some(dir) = data_dir {
            self.storage.data_dir = dir;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PlayerError::Config(format!(
                "Server URL must start with http:// or https:// (got {:?})",
                self.server.url
            )));
        }

        if self.server.timeout_secs == Some(0) {
            return Err(PlayerError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.playback.initial_volume > 100 {
            return Err(PlayerError::Config(format!(
                "Initial volume must be 0-100 (got {})",
                self.playback.initial_volume
            )));
        }

        Ok(())
    }

    /// Backend client settings
    pub fn server_config(&self) -> ServerConfig {
        let config = ServerConfig::new(self.server.url.trim()).with_endpoints(self.server.endpoints.clone());
        match self.server.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

// Default values
fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_volume() -> u8 {
    80
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: default_volume(),
        }
    }
}
