//! Play queue with cursor
//!
//! The queue is the ordered list of tracks eligible for playback plus a
//! cursor naming the current slot. Edits keep the cursor pointing at the
//! same *track*, not the same slot:
//!
//! ```text
//! reorder(1, 3) with cursor on C (index 2)
//!
//!   before:  A  B [C] D  E
//!   after:   A [C] D  B  E      cursor 2 -> 1
//! ```

use crate::error::{PlaybackError, Result};
use tempo_core::{Track, TrackId};

/// Outcome of removing a track from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Removal {
    /// Number of entries removed
    pub removed: usize,

    /// Whether the entry under the cursor was among them
    pub hit_cursor: bool,
}

/// Ordered play queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,

    /// Index of the current slot; 0 when the queue is empty
    cursor: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue over `tracks` with the cursor on the first slot
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Track under the cursor
    pub fn at_cursor(&self) -> Option<&Track> {
        self.tracks.get(self.cursor)
    }

    /// Position of the first entry with this id
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Move the cursor to `index`
    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    /// Reset the cursor to the first slot
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Whether the cursor sits on the last slot
    pub fn cursor_is_last(&self) -> bool {
        !self.tracks.is_empty() && self.cursor == self.tracks.len() - 1
    }

    /// Index after the cursor, wrapping to 0
    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.cursor + 1) % len)
    }

    /// Index before the cursor, wrapping to the last slot
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.cursor + len - 1) % len)
    }

    /// Replace every track
    ///
    /// If `anchor` is present in the new list the cursor follows it,
    /// otherwise the cursor returns to 0.
    pub fn replace(&mut self, tracks: Vec<Track>, anchor: Option<TrackId>) {
        self.tracks = tracks;
        self.cursor = anchor
            .and_then(|id| self.position_of(id))
            .unwrap_or(0);
    }

    /// Move the track at `from` to `to` (list-splice semantics)
    ///
    /// Cursor law:
    /// - moved track was current: cursor = `to`
    /// - `from < cursor <= to`: cursor - 1
    /// - `to <= cursor < from`: cursor + 1
    /// - otherwise unchanged
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return Err(PlaybackError::InvalidReorder { from, to, len });
        }

        if from == to {
            return Ok(());
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        let cursor = self.cursor;
        self.cursor = if cursor == from {
            to
        } else if from < cursor && cursor <= to {
            cursor - 1
        } else if to <= cursor && cursor < from {
            cursor + 1
        } else {
            cursor
        };

        Ok(())
    }

    /// Remove every entry with this id
    ///
    /// Entries before the cursor shift it down by one each. If the entry
    /// under the cursor goes, the cursor resets to 0 and `hit_cursor` is set.
    pub fn remove_id(&mut self, id: TrackId) -> Removal {
        let mut removal = Removal::default();
        let mut index = 0;

        while index < self.tracks.len() {
            if self.tracks[index].id != id {
                index += 1;
                continue;
            }

            self.tracks.remove(index);
            removal.removed += 1;

            if removal.hit_cursor {
                continue;
            }
            if index < self.cursor {
                self.cursor -= 1;
            } else if index == self.cursor {
                removal.hit_cursor = true;
            }
        }

        if removal.hit_cursor || self.cursor >= self.tracks.len() {
            self.cursor = 0;
        }

        removal
    }

    /// Remove all tracks
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = 0;
    }
}
