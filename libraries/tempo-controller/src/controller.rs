//! The player controller
//!
//! Owns the catalog, the playback manager and the playlist store. Every
//! input arrives as a [`UiEvent`]; the answer is the list of [`Effect`]s
//! the host must carry out, ending with the render targets that changed.

use crate::catalog::Catalog;
use crate::effects::{ConfirmRequest, Effect, InputField, NetworkRequest, RenderTarget, View};
use crate::error::Result;
use crate::events::{SelectedFile, UiEvent};
use crate::input::{Key, VOLUME_STEP};
use crate::notification::Notification;
use crate::view::{
    format_time, GridItem, NowPlaying, PlayIcon, PlayerBar, PlaylistCard, PlaylistDetail,
    QueueItem, Renderer, ViewModel, VolumeIcon,
};
use std::time::Duration;
use tempo_core::{PlaylistId, Track, TrackId};
use tempo_playback::{
    MediaCommand, PlaybackConfig, PlaybackEvent, PlaybackManager, RepeatMode, DEFAULT_MEDIA_ROOT,
};
use tempo_storage::{KeyValueStore, PlaylistStore, StorageError};
use tracing::{debug, error, info, warn};

/// Controller settings
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Prefix for audio resource URLs
    pub media_root: String,
    /// Volume at startup (0-100)
    pub initial_volume: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            media_root: DEFAULT_MEDIA_ROOT.to_string(),
            initial_volume: 80,
        }
    }
}

/// Destructive action waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingConfirmation {
    DeleteTrack { track_id: TrackId, filename: String },
    DeletePlaylist { playlist_id: PlaylistId },
}

/// Single owner of player state
pub struct Controller<S> {
    catalog: Catalog,
    playback: PlaybackManager,
    playlists: PlaylistStore<S>,
    view: View,
    pending_confirmation: Option<PendingConfirmation>,
    upload_progress: Option<u8>,
}

impl<S: KeyValueStore> Controller<S> {
    /// Create a controller, loading persisted playlists from `store`
    pub fn new(config: ControllerConfig, store: S) -> Result<Self> {
        let playlists = PlaylistStore::load(store)?;

        let playback = PlaybackManager::new(PlaybackConfig {
            volume: config.initial_volume.min(100),
            media_root: config.media_root,
            ..Default::default()
        });

        Ok(Self {
            catalog: Catalog::new(),
            playback,
            playlists,
            view: View::Home,
            pending_confirmation: None,
            upload_progress: None,
        })
    }

    /// Effects to run once at startup
    pub fn start(&mut self) -> Vec<Effect> {
        info!("Starting controller");
        let mut effects = vec![
            Effect::network(NetworkRequest::FetchCatalog),
            Effect::Media {
                command: MediaCommand::SetVolume {
                    gain: f32::from(self.playback.get_volume()) / 100.0,
                },
            },
        ];
        effects.extend(
            [
                RenderTarget::Navigation,
                RenderTarget::PlayerBar,
                RenderTarget::NowPlaying,
                RenderTarget::Playlists,
            ]
            .map(Effect::render),
        );
        effects
    }

    /// Apply one event
    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        let mut out = Outbox::default();

        match event {
            // ===== Playback =====
            UiEvent::PlayTrack { track_id } => self.play_track(track_id, &mut out),
            UiEvent::PlayQueueIndex { index } => {
                if let Err(e) = self.playback.play_at(index) {
                    debug!(index, error = %e, "Ignoring queue click");
                }
            }
            UiEvent::TogglePlay => self.playback.toggle_play(),
            UiEvent::Next => {
                if let Err(e) = self.playback.next() {
                    debug!(error = %e, "Next ignored");
                }
            }
            UiEvent::Previous => {
                if let Err(e) = self.playback.previous() {
                    debug!(error = %e, "Previous ignored");
                }
            }
            UiEvent::Seek { percent } => {
                if let Err(e) = self.playback.seek_to_percent(percent) {
                    debug!(percent, error = %e, "Seek ignored");
                }
            }
            UiEvent::SetVolume { level } => self.playback.set_volume(level),
            UiEvent::ToggleShuffle => self.playback.toggle_shuffle(),
            UiEvent::ToggleRepeat => self.playback.toggle_repeat(),
            UiEvent::KeyPressed { key, in_text_input } => {
                if !in_text_input {
                    self.key_pressed(key);
                }
            }
            UiEvent::QueueDrop { from, to } => {
                if let Err(e) = self.playback.reorder_queue(from, to) {
                    debug!(from, to, error = %e, "Ignoring invalid drop");
                }
            }

            // ===== Library =====
            UiEvent::Search { query } => {
                self.catalog.search(&query);
                out.render(RenderTarget::Grid);
            }
            UiEvent::UploadSelected { files } => self.upload_selected(files, &mut out),
            UiEvent::DeleteTrackRequested { track_id } => self.request_delete_track(track_id, &mut out),
            UiEvent::DownloadTrack { track_id } => {
                if let Some(track) = self.find_track(track_id) {
                    out.push(Effect::Download {
                        url: self.playback.media_url(track),
                        filename: track.filename.clone(),
                    });
                }
            }

            // ===== Playlists =====
            UiEvent::CreatePlaylist { name } => self.create_playlist(&name, &mut out),
            UiEvent::AddToPlaylistRequested { track_id } => {
                if self.playlists.is_empty() {
                    out.notify(Notification::error("Create a playlist first"));
                } else {
                    out.push(Effect::ChoosePlaylist {
                        track_id,
                        playlists: self.playlist_cards(),
                    });
                }
            }
            UiEvent::AddToPlaylist {
                playlist_id,
                track_id,
            } => self.add_to_playlist(playlist_id, track_id, &mut out),
            UiEvent::RemoveFromPlaylist { playlist_id, index } => {
                self.remove_from_playlist(playlist_id, index, &mut out);
            }
            UiEvent::DeletePlaylistRequested { playlist_id } => {
                if self.playlists.get(playlist_id).is_some() {
                    self.pending_confirmation = Some(PendingConfirmation::DeletePlaylist { playlist_id });
                    out.push(Effect::Confirm {
                        request: ConfirmRequest {
                            message: "Delete this playlist?".to_string(),
                        },
                    });
                }
            }
            UiEvent::PlayPlaylist { playlist_id, start } => self.play_playlist(playlist_id, start, &mut out),
            UiEvent::OpenPlaylist { playlist_id } => {
                if self.playlists.get(playlist_id).is_some() {
                    self.show_view(View::Playlist(playlist_id), &mut out);
                }
            }
            UiEvent::ShowView { view } => self.show_view(view, &mut out),
            UiEvent::Confirmed { accepted } => self.confirmed(accepted, &mut out),

            // ===== Network completions =====
            UiEvent::CatalogLoaded { tracks } => self.catalog_loaded(tracks, &mut out),
            UiEvent::CatalogFailed { message } => {
                warn!(error = %message, "Catalog fetch failed, using sample catalog");
                self.catalog_loaded(Catalog::fallback(), &mut out);
            }
            UiEvent::UploadProgress { percent } => {
                self.upload_progress = Some(percent.min(100));
                out.render(RenderTarget::UploadProgress);
            }
            UiEvent::UploadSucceeded { files } => {
                self.upload_progress = None;
                info!(files, "Upload finished");
                out.notify(Notification::success(format!("{} file(s) uploaded successfully", files)));
                out.push(Effect::network(NetworkRequest::FetchCatalog));
                out.render(RenderTarget::UploadProgress);
            }
            UiEvent::UploadFailed { message } => {
                self.upload_progress = None;
                error!(error = %message, "Upload failed");
                out.notify(Notification::error("Failed to upload files"));
                out.render(RenderTarget::UploadProgress);
            }
            UiEvent::DeleteSucceeded { track_id } => self.track_deleted(track_id, &mut out),
            UiEvent::DeleteFailed { track_id, message } => {
                warn!(track_id = %track_id, error = ?message, "Delete failed");
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Failed to delete track".to_string());
                out.notify(Notification::error(message));
            }

            // ===== Media engine callbacks =====
            UiEvent::PlayStarted => self.playback.on_play_started(),
            UiEvent::PlayRejected { reason } => self.playback.on_play_rejected(&reason),
            UiEvent::MetadataLoaded { duration_secs } => {
                if let Some(duration) = seconds(duration_secs) {
                    self.playback.on_metadata_loaded(duration);
                }
            }
            UiEvent::TimeUpdate { position_secs } => {
                if let Some(position) = seconds(position_secs) {
                    self.playback.on_time_update(position);
                }
            }
            UiEvent::TrackEnded => {
                if let Err(e) = self.playback.on_track_end() {
                    debug!(error = %e, "Track end without a current track");
                }
            }
        }

        self.collect_playback(&mut out);
        out.finish()
    }

    // ===== Handlers =====

    fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Space => self.playback.toggle_play(),
            Key::ArrowLeft => {
                let _ = self.playback.previous();
            }
            Key::ArrowRight => {
                let _ = self.playback.next();
            }
            Key::ArrowUp => self.playback.adjust_volume(VOLUME_STEP),
            Key::ArrowDown => self.playback.adjust_volume(-VOLUME_STEP),
            Key::Other => {}
        }
    }

    fn play_track(&mut self, track_id: TrackId, out: &mut Outbox) {
        if let Some(index) = self.queue_index_of(track_id) {
            let _ = self.playback.play_at(index);
            return;
        }

        // Visible in the grid but not queued (a playlist is playing)
        let Some(index) = self.catalog.index_of(track_id) else {
            debug!(track_id = %track_id, "Ignoring click on unknown track");
            return;
        };
        self.playback.replace_queue(self.catalog.tracks().to_vec());
        let _ = self.playback.play_at(index);
        out.render(RenderTarget::Queue);
    }

    fn upload_selected(&mut self, files: Vec<SelectedFile>, out: &mut Outbox) {
        let selected = files.len();
        let files: Vec<SelectedFile> = files.into_iter().filter(SelectedFile::is_audio).collect();

        if files.is_empty() {
            debug!(selected, "No audio files in upload selection");
            out.notify(Notification::error("No valid audio files selected"));
            return;
        }

        debug!(selected, valid = files.len(), "Starting upload");
        self.upload_progress = Some(0);
        out.push(Effect::network(NetworkRequest::Upload { files }));
        out.render(RenderTarget::UploadProgress);
    }

    fn request_delete_track(&mut self, track_id: TrackId, out: &mut Outbox) {
        let Some((message, filename)) = self
            .find_track(track_id)
            .map(|t| (format!("Delete \"{}\"?", t.title), t.filename.clone()))
        else {
            return;
        };

        self.pending_confirmation = Some(PendingConfirmation::DeleteTrack { track_id, filename });
        out.push(Effect::Confirm {
            request: ConfirmRequest { message },
        });
    }

    fn confirmed(&mut self, accepted: bool, out: &mut Outbox) {
        let Some(pending) = self.pending_confirmation.take() else {
            debug!("Confirmation answer with nothing pending");
            return;
        };

        if !accepted {
            debug!(?pending, "Destructive action cancelled");
            return;
        }

        match pending {
            PendingConfirmation::DeleteTrack { track_id, filename } => {
                out.push(Effect::network(NetworkRequest::DeleteTrack { track_id, filename }));
            }
            PendingConfirmation::DeletePlaylist { playlist_id } => match self.playlists.delete(playlist_id) {
                Ok(_) => {
                    out.notify(Notification::success("Playlist deleted"));
                    self.show_view(View::Playlists, out);
                }
                Err(e) => {
                    error!(playlist_id = %playlist_id, error = %e, "Failed to delete playlist");
                    out.notify(Notification::error("Failed to delete playlist"));
                }
            },
        }
    }

    fn track_deleted(&mut self, track_id: TrackId, out: &mut Outbox) {
        let title = self.find_track(track_id).map(|t| t.title.clone());

        self.catalog.remove(track_id);
        self.playback.remove_track(track_id);

        info!(track_id = %track_id, "Track deleted");
        if let Some(title) = title {
            out.notify(Notification::success(format!("\"{}\" deleted", title)));
        }
        out.render(RenderTarget::Grid);
        out.render(RenderTarget::Queue);
    }

    fn create_playlist(&mut self, name: &str, out: &mut Outbox) {
        match self.playlists.create(name) {
            Ok(playlist) => {
                out.notify(Notification::success(format!("Playlist \"{}\" created", playlist.name)));
                out.render(RenderTarget::Playlists);
            }
            Err(StorageError::InvalidName) => {
                out.push(Effect::HighlightInvalid {
                    field: InputField::PlaylistName,
                });
            }
            Err(e) => {
                error!(error = %e, "Failed to create playlist");
                out.notify(Notification::error("Failed to save playlist"));
            }
        }
    }

    fn add_to_playlist(&mut self, playlist_id: PlaylistId, track_id: TrackId, out: &mut Outbox) {
        let Some(track) = self.find_track(track_id).cloned() else {
            debug!(track_id = %track_id, "Ignoring add of unknown track");
            return;
        };

        match self.playlists.add_track(playlist_id, track) {
            Ok(()) => {
                let name = self
                    .playlists
                    .get(playlist_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                out.notify(Notification::success(format!("Added to \"{}\"", name)));
                out.render(RenderTarget::Playlists);
                out.render(RenderTarget::Playlist(playlist_id));
            }
            Err(StorageError::DuplicateTrack { .. }) => {
                out.notify(Notification::error("This song is already in the playlist"));
            }
            Err(StorageError::PlaylistNotFound(_)) => {
                debug!(playlist_id = %playlist_id, "Ignoring add to unknown playlist");
            }
            Err(e) => {
                error!(error = %e, "Failed to save playlist");
                out.notify(Notification::error("Failed to save playlist"));
            }
        }
    }

    fn remove_from_playlist(&mut self, playlist_id: PlaylistId, index: usize, out: &mut Outbox) {
        match self.playlists.remove_track(playlist_id, index) {
            Ok(Some(_)) => {
                out.notify(Notification::success("Song removed from playlist"));
                out.render(RenderTarget::Playlist(playlist_id));
                out.render(RenderTarget::Playlists);
            }
            Ok(None) | Err(StorageError::PlaylistNotFound(_)) => {}
            Err(e) => {
                error!(error = %e, "Failed to save playlist");
                out.notify(Notification::error("Failed to save playlist"));
            }
        }
    }

    fn play_playlist(&mut self, playlist_id: PlaylistId, start: usize, out: &mut Outbox) {
        let songs = match self.playlists.songs_for_playback(playlist_id) {
            Ok(songs) => songs,
            Err(e) => {
                debug!(error = %e, "Ignoring play of unknown playlist");
                return;
            }
        };

        if start >= songs.len() {
            debug!(playlist_id = %playlist_id, start, len = songs.len(), "Nothing to play");
            return;
        }

        info!(playlist_id = %playlist_id, songs = songs.len(), start, "Playing playlist");
        self.catalog.show(songs.clone());
        self.playback.replace_queue(songs);
        let _ = self.playback.play_at(start);

        out.render(RenderTarget::Grid);
        out.render(RenderTarget::Queue);
    }

    fn show_view(&mut self, view: View, out: &mut Outbox) {
        self.view = view;
        out.render(RenderTarget::Navigation);
        match view {
            View::Home => out.render(RenderTarget::Grid),
            View::Playlists => out.render(RenderTarget::Playlists),
            View::Playlist(id) => out.render(RenderTarget::Playlist(id)),
        }
    }

    fn catalog_loaded(&mut self, tracks: Vec<Track>, out: &mut Outbox) {
        debug!(tracks = tracks.len(), "Catalog loaded");
        self.catalog.set_tracks(tracks.clone());
        self.playback.replace_queue(tracks);
        out.render(RenderTarget::Grid);
        out.render(RenderTarget::Queue);
    }

    /// Turn queued playback output into media and render effects
    fn collect_playback(&mut self, out: &mut Outbox) {
        for command in self.playback.drain_commands() {
            out.push(Effect::Media { command });
        }

        for event in self.playback.drain_events() {
            match event {
                PlaybackEvent::StateChanged { .. } => {
                    out.render(RenderTarget::PlayerBar);
                    out.render(RenderTarget::Grid);
                }
                PlaybackEvent::TrackChanged { .. } => {
                    out.render(RenderTarget::NowPlaying);
                    out.render(RenderTarget::PlayerBar);
                    out.render(RenderTarget::Grid);
                    out.render(RenderTarget::Queue);
                }
                PlaybackEvent::QueueChanged { .. } => out.render(RenderTarget::Queue),
                PlaybackEvent::VolumeChanged { .. }
                | PlaybackEvent::ModesChanged { .. }
                | PlaybackEvent::PositionUpdate { .. } => out.render(RenderTarget::PlayerBar),
                PlaybackEvent::Error { message } => {
                    warn!(reason = %message, "Playback did not start");
                    out.render(RenderTarget::PlayerBar);
                }
            }
        }
    }

    // ===== Lookups =====

    fn queue_index_of(&self, track_id: TrackId) -> Option<usize> {
        self.playback.get_queue().iter().position(|t| t.id == track_id)
    }

    /// Track by id from the catalog, falling back to the queue
    fn find_track(&self, track_id: TrackId) -> Option<&Track> {
        self.catalog
            .get(track_id)
            .or_else(|| self.playback.get_queue().iter().find(|t| t.id == track_id))
    }

    fn playlist_cards(&self) -> Vec<PlaylistCard> {
        self.playlists.list().iter().map(PlaylistCard::from).collect()
    }

    // ===== View Models =====

    /// Build the model for one render target
    pub fn view_model(&self, target: RenderTarget) -> ViewModel {
        match target {
            RenderTarget::Grid => ViewModel::Grid(self.grid_items()),
            RenderTarget::Queue => ViewModel::Queue(self.queue_items()),
            RenderTarget::NowPlaying => ViewModel::NowPlaying(self.now_playing()),
            RenderTarget::PlayerBar => ViewModel::PlayerBar(self.player_bar()),
            RenderTarget::Playlists => ViewModel::Playlists(self.playlist_cards()),
            RenderTarget::Playlist(id) => {
                ViewModel::Playlist(self.playlists.get(id).map(PlaylistDetail::from))
            }
            RenderTarget::Navigation => ViewModel::Navigation(self.view),
            RenderTarget::UploadProgress => ViewModel::UploadProgress(self.upload_progress),
        }
    }

    /// Draw one render target with `renderer`
    pub fn render<R: Renderer + ?Sized>(&self, target: RenderTarget, renderer: &mut R) {
        self.view_model(target).render_into(renderer);
    }

    pub fn grid_items(&self) -> Vec<GridItem> {
        let current = self.playback.get_current_track().map(|t| t.id);
        let playing = self.playback.is_playing();
        self.catalog
            .filtered()
            .iter()
            .map(|track| GridItem::new(track, current, playing))
            .collect()
    }

    pub fn queue_items(&self) -> Vec<QueueItem> {
        let has_current = self.playback.get_current_track().is_some();
        let cursor = self.playback.cursor();
        self.playback
            .get_queue()
            .iter()
            .enumerate()
            .map(|(index, track)| QueueItem::new(index, track, has_current && index == cursor))
            .collect()
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.playback.get_current_track().map(NowPlaying::from)
    }

    pub fn player_bar(&self) -> PlayerBar {
        let volume = self.playback.get_volume();
        let repeat = self.playback.get_repeat();
        PlayerBar {
            play_icon: if self.playback.is_playing() {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
            shuffle_active: self.playback.is_shuffled(),
            repeat,
            repeat_active: repeat != RepeatMode::Off,
            volume,
            volume_icon: VolumeIcon::for_level(volume),
            progress_percent: self.playback.progress_percent().unwrap_or(0.0),
            current_time: format_time(Some(self.playback.get_position().as_secs_f64())),
            total_time: format_time(self.playback.get_duration().map(|d| d.as_secs_f64())),
        }
    }

    // ===== Accessors =====

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playback(&self) -> &PlaybackManager {
        &self.playback
    }

    pub fn playlists(&self) -> &PlaylistStore<S> {
        &self.playlists
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn upload_progress(&self) -> Option<u8> {
        self.upload_progress
    }

    pub fn has_pending_confirmation(&self) -> bool {
        self.pending_confirmation.is_some()
    }
}

/// Seconds as a `Duration`, if representable
fn seconds(value: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(value).ok()
}

/// Effects collected while handling one event
///
/// Render targets are de-duplicated and emitted last.
#[derive(Default)]
struct Outbox {
    effects: Vec<Effect>,
    renders: Vec<RenderTarget>,
}

impl Outbox {
    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn notify(&mut self, notification: Notification) {
        self.effects.push(Effect::notify(notification));
    }

    fn render(&mut self, target: RenderTarget) {
        if !self.renders.contains(&target) {
            self.renders.push(target);
        }
    }

    fn finish(mut self) -> Vec<Effect> {
        self.effects
            .extend(self.renders.into_iter().map(Effect::render));
        self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_storage::MemoryKeyValueStore;

    fn controller() -> Controller<MemoryKeyValueStore> {
        Controller::new(ControllerConfig::default(), MemoryKeyValueStore::new()).unwrap()
    }

    #[test]
    fn start_fetches_catalog_and_sets_volume() {
        let mut controller = controller();
        let effects = controller.start();

        assert_eq!(effects[0], Effect::network(NetworkRequest::FetchCatalog));
        assert_eq!(
            effects[1],
            Effect::Media {
                command: MediaCommand::SetVolume { gain: 0.8 }
            }
        );
    }

    #[test]
    fn renders_come_last_and_once() {
        let mut out = Outbox::default();
        out.render(RenderTarget::Grid);
        out.notify(Notification::success("hi"));
        out.render(RenderTarget::Grid);

        let effects = out.finish();
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::Notify { .. }));
        assert_eq!(effects[1], Effect::render(RenderTarget::Grid));
    }

    #[test]
    fn unrepresentable_seconds_are_dropped() {
        assert_eq!(seconds(-1.0), None);
        assert_eq!(seconds(f64::NAN), None);
        assert_eq!(seconds(f64::INFINITY), None);
        assert_eq!(seconds(1e300), None);
        assert_eq!(seconds(1.5), Some(Duration::from_millis(1500)));
    }
}
