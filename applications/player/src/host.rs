//! Effect executor
//!
//! Runs the controller's effects: backend calls on tokio tasks whose
//! completions come back through a channel, media commands on the headless
//! engine, everything else through the text renderer.

use crate::commands::{Command, PlaylistAction, HELP};
use crate::media::HeadlessEngine;
use crate::renderer::TextRenderer;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempo_controller::{
    Controller, Effect, InputField, NetworkRequest, RenderTarget, SelectedFile, UiEvent,
};
use tempo_core::{Track, TrackId};
use tempo_server_client::{
    Result as ClientResult, ServerClientError, TempoServerClient, UploadFile, UploadProgress,
};
use tempo_storage::KeyValueStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Backend operations the host needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn list_tracks(&self) -> ClientResult<Vec<Track>>;

    /// Upload the selected files, returning how many the server stored
    async fn upload(
        &self,
        files: Vec<SelectedFile>,
        progress: UnboundedSender<UploadProgress>,
    ) -> ClientResult<usize>;

    async fn delete(&self, filename: &str) -> ClientResult<()>;
}

#[async_trait]
impl Backend for TempoServerClient {
    async fn list_tracks(&self) -> ClientResult<Vec<Track>> {
        TempoServerClient::list_tracks(self).await
    }

    async fn upload(
        &self,
        files: Vec<SelectedFile>,
        progress: UnboundedSender<UploadProgress>,
    ) -> ClientResult<usize> {
        let mut upload = Vec::with_capacity(files.len());
        for file in &files {
            let mut loaded = UploadFile::from_path(Path::new(&file.location)).await?;
            loaded.mime_type.clone_from(&file.mime_type);
            upload.push(loaded);
        }

        let response = self.upload_tracks_with_progress(upload, progress).await?;
        Ok(response.files.len())
    }

    async fn delete(&self, filename: &str) -> ClientResult<()> {
        self.delete_track(filename).await
    }
}

/// Message for a failed delete: the server's own text when it sent one
fn delete_failure_message(err: &ServerClientError) -> Option<String> {
    match err {
        ServerClientError::ServerError { message, .. } if !message.trim().is_empty() => {
            Some(message.clone())
        }
        _ => None,
    }
}

/// Terminal host around one controller
pub struct Host<S, B, W> {
    controller: Controller<S>,
    backend: Arc<B>,
    engine: HeadlessEngine,
    renderer: TextRenderer<W>,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
}

impl<S, B, W> Host<S, B, W>
where
    S: KeyValueStore,
    B: Backend,
    W: Write,
{
    pub fn new(controller: Controller<S>, backend: Arc<B>, renderer: TextRenderer<W>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            backend,
            engine: HeadlessEngine::new(),
            renderer,
            events_tx,
            events_rx,
        }
    }

    /// Run the controller's startup effects
    pub fn start(&mut self) {
        let effects = self.controller.start();
        let callbacks = self.execute(effects);
        self.dispatch_all(callbacks);
    }

    /// Feed one event and run everything it causes synchronously
    pub fn dispatch(&mut self, event: UiEvent) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let effects = self.controller.handle(event);
            pending.extend(self.execute(effects));
        }
    }

    /// Wait for the next backend completion and apply it
    ///
    /// Returns `false` once no task can send any more.
    pub async fn pump(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Interpret one terminal command; returns `false` on quit
    pub fn run_command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Help => self.renderer.message(HELP),
            Command::Show(target) => self.controller.render(target, &mut self.renderer),
            Command::EndTrack => {
                let events = self.engine.finish();
                self.dispatch_all(events);
            }
            Command::Tick(seconds) => match Duration::try_from_secs_f64(seconds) {
                Ok(by) if !by.is_zero() => {
                    let events = self.engine.advance(by);
                    self.dispatch_all(events);
                }
                _ => debug!(seconds, "Tick ignored"),
            },
            Command::Event(event) => self.dispatch(event),
            Command::Playlist { slot, action } => self.playlist_command(slot, action),
        }
        true
    }

    /// Read commands from `input` until it closes or `quit`, applying
    /// backend completions as they arrive
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match crate::commands::parse(&line) {
                        Ok(command) => {
                            if !self.run_command(command) {
                                break;
                            }
                        }
                        Err(e) => self.renderer.message(&e.to_string()),
                    }
                }
                Some(event) = self.events_rx.recv() => self.dispatch(event),
            }
        }

        info!("Shutting down");
        Ok(())
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub fn engine(&self) -> &HeadlessEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &TextRenderer<W> {
        &self.renderer
    }

    fn dispatch_all(&mut self, events: Vec<UiEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    fn playlist_command(&mut self, slot: usize, action: PlaylistAction) {
        let Some(playlist_id) = self.controller.playlists().list().get(slot).map(|p| p.id) else {
            self.renderer.message(&format!("No playlist at slot {}", slot));
            return;
        };

        let event = match action {
            PlaylistAction::Add { track_id } => UiEvent::AddToPlaylist {
                playlist_id,
                track_id,
            },
            PlaylistAction::Remove { index } => UiEvent::RemoveFromPlaylist { playlist_id, index },
            PlaylistAction::Delete => UiEvent::DeletePlaylistRequested { playlist_id },
            PlaylistAction::Play { start } => UiEvent::PlayPlaylist { playlist_id, start },
            PlaylistAction::Open => UiEvent::OpenPlaylist { playlist_id },
        };
        self.dispatch(event);
    }

    /// Run effects, returning engine callbacks to feed back in
    fn execute(&mut self, effects: Vec<Effect>) -> Vec<UiEvent> {
        let mut callbacks = Vec::new();

        for effect in effects {
            match effect {
                Effect::Render { target } => self.controller.render(target, &mut self.renderer),
                Effect::Media { command } => {
                    let hint = self.controller.playback().get_current_track().and_then(|t| t.duration);
                    callbacks.extend(self.engine.apply(&command, hint));
                }
                Effect::Network { request } => self.spawn_request(request),
                Effect::Notify { notification } => self.renderer.notification(&notification),
                Effect::Confirm { request } => self.renderer.prompt(&request.message),
                Effect::HighlightInvalid { field } => match field {
                    InputField::PlaylistName => self.renderer.message("! Playlist name cannot be empty"),
                },
                Effect::ChoosePlaylist { track_id, playlists } => {
                    self.renderer.message("Choose a playlist:");
                    self.controller.render(RenderTarget::Playlists, &mut self.renderer);
                    self.renderer.message(&format!(
                        "then `add {} <slot>` ({} available)",
                        track_id,
                        playlists.len()
                    ));
                }
                Effect::Download { url, filename } => {
                    info!(url = %url, filename = %filename, "Download requested");
                    self.renderer.message(&format!("Download {}: {}", filename, url));
                }
            }
        }

        callbacks
    }

    fn spawn_request(&self, request: NetworkRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = run_request(backend.as_ref(), request, &tx).await;
            if tx.send(event).is_err() {
                debug!("Host gone before request completed");
            }
        });
    }
}

/// Perform one backend request and describe its outcome as an event
async fn run_request<B: Backend + ?Sized>(
    backend: &B,
    request: NetworkRequest,
    tx: &UnboundedSender<UiEvent>,
) -> UiEvent {
    match request {
        NetworkRequest::FetchCatalog => match backend.list_tracks().await {
            Ok(tracks) => {
                info!(tracks = tracks.len(), "Catalog fetched");
                UiEvent::CatalogLoaded { tracks }
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                UiEvent::CatalogFailed {
                    message: e.to_string(),
                }
            }
        },
        NetworkRequest::Upload { files } => {
            let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<UploadProgress>();
            let upload = backend.upload(files, progress_tx);
            tokio::pin!(upload);

            let result = loop {
                tokio::select! {
                    result = &mut upload => break result,
                    Some(progress) = progress_rx.recv() => {
                        let _ = tx.send(UiEvent::UploadProgress { percent: progress.percent() });
                    }
                }
            };
            while let Ok(progress) = progress_rx.try_recv() {
                let _ = tx.send(UiEvent::UploadProgress {
                    percent: progress.percent(),
                });
            }

            match result {
                Ok(files) => UiEvent::UploadSucceeded { files },
                Err(e) => {
                    error!(error = %e, "Upload failed");
                    UiEvent::UploadFailed {
                        message: e.user_message(),
                    }
                }
            }
        }
        NetworkRequest::DeleteTrack { track_id, filename } => delete(backend, track_id, &filename).await,
    }
}

async fn delete<B: Backend + ?Sized>(backend: &B, track_id: TrackId, filename: &str) -> UiEvent {
    match backend.delete(filename).await {
        Ok(()) => UiEvent::DeleteSucceeded { track_id },
        Err(e) => {
            warn!(track_id = %track_id, error = %e, "Delete failed");
            UiEvent::DeleteFailed {
                track_id,
                message: delete_failure_message(&e),
            }
        }
    }
}
