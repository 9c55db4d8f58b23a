//! Tempo Player - Controller
//!
//! Ties the library catalog, the playback state machine and the playlist
//! store together behind a single event handler.
//!
//! # Architecture
//!
//! The controller performs no I/O of its own. A host feeds it [`UiEvent`]s
//! (user input, backend completions, media engine callbacks) and runs the
//! [`Effect`]s it returns:
//!
//! - `Media` commands for the audio engine
//! - `Network` requests for the backend
//! - `Notify`, `Confirm` and the other UI side effects
//! - `Render` targets whose [`ViewModel`] changed
//!
//! # Example
//!
//! ```rust
//! use tempo_controller::{Controller, ControllerConfig, Effect, NetworkRequest, UiEvent};
//! use tempo_core::{Track, TrackId};
//! use tempo_storage::MemoryKeyValueStore;
//!
//! let mut controller =
//!     Controller::new(ControllerConfig::default(), MemoryKeyValueStore::new()).unwrap();
//!
//! let effects = controller.start();
//! assert!(effects.contains(&Effect::network(NetworkRequest::FetchCatalog)));
//!
//! controller.handle(UiEvent::CatalogLoaded {
//!     tracks: vec![Track::new(TrackId::new(1), "Intro", "intro.mp3")],
//! });
//! controller.handle(UiEvent::PlayTrack { track_id: TrackId::new(1) });
//! assert_eq!(controller.now_playing().unwrap().title, "Intro");
//! ```

pub mod catalog;
mod controller;
pub mod effects;
mod error;
pub mod events;
pub mod input;
pub mod notification;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::Catalog;
pub use controller::{Controller, ControllerConfig};
pub use effects::{ConfirmRequest, Effect, InputField, NetworkRequest, RenderTarget, View};
pub use error::{ControllerError, Result};
pub use events::{SelectedFile, UiEvent};
pub use input::{drop_index, Key, VOLUME_STEP};
pub use notification::{Notification, NotificationKind, NOTIFICATION_DURATION};
pub use view::{
    format_time, GridItem, NowPlaying, PlayIcon, PlayerBar, PlaylistCard, PlaylistDetail,
    PlaylistSongItem, QueueItem, Renderer, ViewModel, VolumeIcon,
};

#[cfg(feature = "wasm")]
pub use wasm::WasmController;
