//! Tempo Player - terminal host
//!
//! Wires the controller to real collaborators: the HTTP backend client,
//! a file-backed playlist store, a headless media engine and a text
//! renderer driven by line commands.

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod media;
pub mod renderer;

pub use commands::{parse, Command, CommandError, PlaylistAction};
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use host::{Backend, Host};
pub use media::HeadlessEngine;
pub use renderer::TextRenderer;
