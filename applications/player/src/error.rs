//! Host errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] tempo_storage::StorageError),

    #[error(transparent)]
    Client(#[from] tempo_server_client::ServerClientError),

    #[error(transparent)]
    Controller(#[from] tempo_controller::ControllerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
