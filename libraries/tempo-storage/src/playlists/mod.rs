//! Playlist store
//!
//! The full playlist set lives in memory and is written through to the
//! key-value store, as one JSON array under [`PLAYLISTS_KEY`], after every
//! mutation. Last write wins.

use crate::error::{Result, StorageError};
use crate::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use tempo_core::{Playlist, PlaylistId, Track};
use tracing::{debug, error, info};

/// Key the playlist set is persisted under
pub const PLAYLISTS_KEY: &str = "playlists";

/// User playlists with write-through persistence
#[derive(Debug)]
pub struct PlaylistStore<S> {
    store: S,
    playlists: Vec<Playlist>,
}

impl<S: KeyValueStore> PlaylistStore<S> {
    /// Load the playlist set from `store`
    ///
    /// An absent key yields an empty set; unreadable JSON is an error.
    pub fn load(store: S) -> Result<Self> {
        let playlists = match store.get(PLAYLISTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        debug!(count = playlists.len(), "Loaded playlists");
        Ok(Self { store, playlists })
    }

    /// Create an empty playlist stamped with the current time
    pub fn create(&mut self, name: &str) -> Result<&Playlist> {
        self.create_at(name, Utc::now())
    }

    /// Create an empty playlist with an explicit creation time
    ///
    /// The id derives from `created`; if it is already taken the next free
    /// id above every existing one is used.
    pub fn create_at(&mut self, name: &str, created: DateTime<Utc>) -> Result<&Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidName);
        }

        let mut id = PlaylistId::from_time(created);
        if self.get(id).is_some() {
            let max = self.playlists.iter().map(|p| p.id.get()).max().unwrap_or(0);
            id = PlaylistId::new(max + 1);
        }

        self.playlists.push(Playlist::with_created(id, name, created));
        self.persist()?;

        info!(playlist_id = %id, name, "Created playlist");
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    /// Append `track` to a playlist
    pub fn add_track(&mut self, playlist_id: PlaylistId, track: Track) -> Result<()> {
        let playlist = self.get_mut(playlist_id)?;

        if playlist.contains(track.id) {
            return Err(StorageError::DuplicateTrack {
                playlist_id,
                track_id: track.id,
            });
        }

        debug!(playlist_id = %playlist_id, track_id = %track.id, "Adding track to playlist");
        playlist.songs.push(track);
        self.persist()
    }

    /// Remove the song at `index`
    ///
    /// An out-of-range index is a no-op returning `Ok(None)`.
    pub fn remove_track(&mut self, playlist_id: PlaylistId, index: usize) -> Result<Option<Track>> {
        let playlist = self.get_mut(playlist_id)?;

        if index >= playlist.songs.len() {
            debug!(playlist_id = %playlist_id, index, "Ignoring removal past end of playlist");
            return Ok(None);
        }

        let removed = playlist.songs.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Delete a playlist
    pub fn delete(&mut self, playlist_id: PlaylistId) -> Result<Playlist> {
        let position = self
            .playlists
            .iter()
            .position(|p| p.id == playlist_id)
            .ok_or(StorageError::PlaylistNotFound(playlist_id))?;

        let removed = self.playlists.remove(position);
        self.persist()?;

        info!(playlist_id = %playlist_id, name = %removed.name, "Deleted playlist");
        Ok(removed)
    }

    pub fn get(&self, playlist_id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == playlist_id)
    }

    /// All playlists in creation order
    pub fn list(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Copy of a playlist's songs, ready to become the play queue
    pub fn songs_for_playback(&self, playlist_id: PlaylistId) -> Result<Vec<Track>> {
        self.get(playlist_id)
            .map(|p| p.songs.clone())
            .ok_or(StorageError::PlaylistNotFound(playlist_id))
    }

    /// Underlying key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn get_mut(&mut self, playlist_id: PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or(StorageError::PlaylistNotFound(playlist_id))
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.playlists)?;
        self.store.set(PLAYLISTS_KEY, &json).map_err(|e| {
            error!(error = %e, "Failed to persist playlists");
            e
        })
    }
}
