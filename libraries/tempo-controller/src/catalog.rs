//! Library catalog and search
//!
//! The catalog is the full track list from the backend. What the grid shows
//! is a derived view: either the search result over the catalog or, while a
//! playlist is being played, a copy of that playlist's songs.

use tempo_core::{Track, TrackId};

/// Full track list plus the displayed view
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    view: Vec<Track>,
    query: String,

    /// View holds an explicit sequence rather than a search result
    pinned: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder catalog used when the backend cannot be reached
    pub fn fallback() -> Vec<Track> {
        vec![
            Track::new(TrackId::new(1), "Sample Song 1", "sample1.mp3").with_artist("Sample Artist"),
            Track::new(TrackId::new(2), "Sample Song 2", "sample2.mp3").with_artist("Sample Artist"),
        ]
    }

    /// Replace the catalog, keeping the current search applied
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.refilter();
    }

    /// Filter by case-insensitive substring over title or artist
    ///
    /// A blank query shows the whole catalog.
    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
        self.refilter();
    }

    /// Show an arbitrary sequence (a playlist being played) instead of the
    /// search result. The next search or catalog change recomputes the view.
    pub fn show(&mut self, tracks: Vec<Track>) {
        self.view = tracks;
        self.pinned = true;
    }

    /// Drop a deleted track and recompute the view with the current query
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let position = self.index_of(id)?;
        let removed = self.tracks.remove(position);
        if self.pinned {
            self.view.retain(|t| t.id != id);
        } else {
            self.refilter();
        }
        Some(removed)
    }

    /// All tracks in backend order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks currently displayed
    pub fn filtered(&self) -> &[Track] {
        &self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Catalog position of a track; displayed rows map back through this
    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    fn refilter(&mut self) {
        self.pinned = false;
        self.view = if self.query.is_empty() {
            self.tracks.clone()
        } else {
            self.tracks
                .iter()
                .filter(|t| t.matches(&self.query))
                .cloned()
                .collect()
        };
    }
}
