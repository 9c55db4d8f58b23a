//! Playback manager - core orchestration
//!
//! Coordinates queue, cursor, volume, shuffle and repeat. Media I/O is left
//! to the platform: the manager queues `MediaCommand`s and is told about
//! engine progress through the `on_*` callbacks.

use crate::{
    error::{PlaybackError, Result},
    events::{MediaCommand, PlaybackEvent},
    queue::Queue,
    shuffle::random_index,
    types::{PlaybackConfig, PlaybackState, RepeatMode},
    volume::Volume,
};
use std::time::Duration;
use tempo_core::{Track, TrackId};
use tracing::{debug, warn};

/// Central playback management
///
/// Orchestrates all playback functionality:
/// - Queue and cursor (with drag reorder)
/// - Play/pause with asynchronous confirmation from the media engine
/// - Wrapping next/previous navigation
/// - Shuffle (stateless random pick) and repeat (Off, One, All)
/// - Seek by percentage and volume (0-100%)
pub struct PlaybackManager {
    // State
    state: PlaybackState,
    current_track: Option<Track>,

    queue: Queue,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    media_root: String,

    // Reported by the media engine
    position: Duration,
    duration: Option<Duration>,

    // Outboxes drained by the caller
    pending_commands: Vec<MediaCommand>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_track: None,
            queue: Queue::new(),
            volume: Volume::new(config.volume),
            shuffle: config.shuffle,
            repeat: config.repeat,
            media_root: config.media_root.trim_end_matches('/').to_string(),
            position: Duration::ZERO,
            duration: None,
            pending_commands: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Load and start the queue entry at `index`
    ///
    /// Out-of-range indices leave all state untouched.
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        self.queue.set_cursor(index)?;

        let track = self
            .queue
            .at_cursor()
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: self.queue.len(),
            })?;

        debug!(index, track_id = %track.id, title = %track.title, "Loading track");

        let url = self.media_url(&track);
        let previous = self.current_track.replace(track);
        let previous_track_id = previous.map(|t| t.id);

        self.position = Duration::ZERO;
        self.duration = None;

        self.pending_commands.push(MediaCommand::Load { url });
        self.pending_commands.push(MediaCommand::Play);

        self.set_state(PlaybackState::Loading);
        self.emit_track_changed(previous_track_id);
        Ok(())
    }

    /// Toggle between playing and paused
    ///
    /// With no current track, starts the first queue entry (if any).
    pub fn toggle_play(&mut self) {
        if self.current_track.is_none() {
            if !self.queue.is_empty() {
                // Index 0 always exists here
                let _ = self.play_at(0);
            }
            return;
        }

        match self.state {
            PlaybackState::Playing => {
                self.pending_commands.push(MediaCommand::Pause);
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Paused | PlaybackState::Loading | PlaybackState::Idle => {
                self.pending_commands.push(MediaCommand::Play);
                self.set_state(PlaybackState::Loading);
            }
        }
    }

    /// Skip to next track
    ///
    /// With shuffle on, any slot may come next (including the current one).
    pub fn next(&mut self) -> Result<()> {
        let index = if self.shuffle {
            random_index(self.queue.len(), &mut rand::thread_rng())
        } else {
            self.queue.next_index()
        }
        .ok_or(PlaybackError::QueueEmpty)?;

        self.play_at(index)
    }

    /// Go to previous track, wrapping from the first slot to the last
    pub fn previous(&mut self) -> Result<()> {
        let index = self.queue.previous_index().ok_or(PlaybackError::QueueEmpty)?;
        self.play_at(index)
    }

    /// Stop playback and forget the current track (queue is kept)
    pub fn stop(&mut self) {
        self.pending_commands.push(MediaCommand::Pause);
        let previous = self.current_track.take();
        self.queue.reset_cursor();
        self.position = Duration::ZERO;
        self.duration = None;
        self.set_state(PlaybackState::Idle);
        if let Some(track) = previous {
            self.emit_track_changed(Some(track.id));
        }
    }

    // ===== Media Engine Callbacks =====

    /// The engine confirmed playback started
    pub fn on_play_started(&mut self) {
        if self.current_track.is_none() {
            debug!("Play confirmation arrived after playback was reset");
            return;
        }
        self.set_state(PlaybackState::Playing);
    }

    /// The engine refused to play (autoplay blocked, resource missing, ...)
    ///
    /// Playback stays stopped; there is no retry.
    pub fn on_play_rejected(&mut self, reason: &str) {
        warn!(reason = %reason, "Media engine rejected playback");
        if self.current_track.is_some() {
            self.set_state(PlaybackState::Paused);
        }
        self.pending_events.push(PlaybackEvent::Error {
            message: reason.to_string(),
        });
    }

    /// Track metadata (duration) is available
    pub fn on_metadata_loaded(&mut self, duration: Duration) {
        self.duration = Some(duration).filter(|d| !d.is_zero());
        self.emit_position_update();
    }

    /// Periodic position report
    pub fn on_time_update(&mut self, position: Duration) {
        self.position = position;
        self.emit_position_update();
    }

    /// Playback reached the end of the current track
    pub fn on_track_end(&mut self) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        if self.repeat == RepeatMode::One {
            debug!("Repeat one: restarting track");
            self.position = Duration::ZERO;
            self.pending_commands.push(MediaCommand::Seek {
                position: Duration::ZERO,
            });
            self.pending_commands.push(MediaCommand::Play);
            return Ok(());
        }

        if self.repeat == RepeatMode::All || !self.queue.cursor_is_last() {
            return self.next();
        }

        debug!("End of queue reached");
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    // ===== Seek =====

    /// Seek to a percentage (0-100) of the current track
    ///
    /// Out-of-range percentages are clamped; NaN and infinities are rejected.
    pub fn seek_to_percent(&mut self, percent: f64) -> Result<()> {
        if !percent.is_finite() {
            return Err(PlaybackError::InvalidSeek);
        }
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;

        let fraction = percent.clamp(0.0, 100.0) / 100.0;
        let position = duration.mul_f64(fraction);

        self.position = position;
        self.pending_commands.push(MediaCommand::Seek { position });
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (clamped to 0-100)
    pub fn set_volume(&mut self, level: i32) {
        self.volume.set_level(level);
        self.emit_volume_changed();
    }

    /// Change volume by `delta` points (clamped to 0-100)
    pub fn adjust_volume(&mut self, delta: i32) {
        self.volume.adjust(delta);
        self.emit_volume_changed();
    }

    /// Get current volume (0-100)
    pub fn get_volume(&self) -> u8 {
        self.volume.level()
    }

    // ===== Modes =====

    /// Flip shuffle on/off
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.emit_modes_changed();
    }

    /// Advance repeat mode: Off → One → All → Off
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycled();
        self.emit_modes_changed();
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Queue Management =====

    /// Replace the queue wholesale
    ///
    /// The cursor follows the current track if it is still present.
    pub fn replace_queue(&mut self, tracks: Vec<Track>) {
        let anchor = self.current_track.as_ref().map(|t| t.id);
        self.queue.replace(tracks, anchor);
        self.emit_queue_changed();
    }

    /// Move a queue entry (drag and drop)
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> Result<()> {
        self.queue.reorder(from, to)?;
        debug!(from, to, cursor = self.queue.cursor(), "Queue reordered");
        self.emit_queue_changed();
        Ok(())
    }

    /// Drop a track from the queue after it was deleted
    ///
    /// Deleting the current track stops playback. Returns whether anything
    /// was removed.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let removal = self.queue.remove_id(id);
        let was_current = self.current_track.as_ref().is_some_and(|t| t.id == id);

        if was_current {
            self.stop();
        }

        if removal.removed > 0 {
            self.emit_queue_changed();
        }
        removal.removed > 0 || was_current
    }

    pub fn get_queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    // ===== State Queries =====

    pub fn get_state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn get_current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn get_position(&self) -> Duration {
        self.position
    }

    /// Track duration, once the engine has reported it
    pub fn get_duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Position as a percentage of duration
    pub fn progress_percent(&self) -> Option<f64> {
        let duration = self.duration?;
        Some((self.position.as_secs_f64() / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0))
    }

    /// URL of a track's audio resource
    pub fn media_url(&self, track: &Track) -> String {
        format!("{}/{}", self.media_root, track.filename)
    }

    // ===== Outboxes =====

    /// Take queued media commands
    pub fn drain_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Take queued UI events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Event Emission =====

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Playback state changed");
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_track_changed(&mut self, previous_track_id: Option<TrackId>) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: self.current_track.as_ref().map(|t| t.id),
            previous_track_id,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_commands.push(MediaCommand::SetVolume {
            gain: self.volume.gain(),
        });
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    fn emit_modes_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModesChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: self.position.as_millis() as u64,
            duration_ms: self.duration.map(|d| d.as_millis() as u64),
        });
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: u64) -> Track {
        Track::new(TrackId::new(id), format!("Track {}", id), format!("{}.mp3", id))
    }

    fn manager_with(n: u64) -> PlaybackManager {
        let mut manager = PlaybackManager::default();
        manager.replace_queue((0..n).map(create_test_track).collect());
        manager.drain_events();
        manager
    }

    #[test]
    fn create_playback_manager() {
        let manager = PlaybackManager::default();
        assert_eq!(manager.get_state(), PlaybackState::Idle);
        assert_eq!(manager.get_volume(), 80);
        assert!(manager.get_current_track().is_none());
    }

    #[test]
    fn play_at_queues_load_then_play() {
        let mut manager = manager_with(3);
        manager.play_at(1).unwrap();

        assert_eq!(
            manager.drain_commands(),
            vec![
                MediaCommand::Load {
                    url: "/static/music/1.mp3".to_string()
                },
                MediaCommand::Play,
            ]
        );
        assert_eq!(manager.get_state(), PlaybackState::Loading);
        assert_eq!(manager.cursor(), 1);
        assert!(!manager.is_playing());

        manager.on_play_started();
        assert!(manager.is_playing());
    }

    #[test]
    fn play_at_out_of_range_is_noop() {
        let mut manager = manager_with(2);
        assert!(manager.play_at(2).is_err());
        assert!(manager.drain_commands().is_empty());
        assert!(manager.get_current_track().is_none());
        assert_eq!(manager.get_state(), PlaybackState::Idle);
    }

    #[test]
    fn rejected_play_stays_paused() {
        let mut manager = manager_with(1);
        manager.play_at(0).unwrap();
        manager.drain_events();

        manager.on_play_rejected("NotAllowedError");
        assert_eq!(manager.get_state(), PlaybackState::Paused);
        assert!(manager
            .drain_events()
            .contains(&PlaybackEvent::Error {
                message: "NotAllowedError".to_string()
            }));
    }

    #[test]
    fn toggle_play_starts_first_track() {
        let mut manager = manager_with(2);
        manager.toggle_play();
        assert_eq!(manager.get_current_track().unwrap().id, TrackId::new(0));
    }

    #[test]
    fn toggle_play_on_empty_queue_is_noop() {
        let mut manager = PlaybackManager::default();
        manager.toggle_play();
        assert!(manager.drain_commands().is_empty());
        assert_eq!(manager.get_state(), PlaybackState::Idle);
    }

    #[test]
    fn toggle_play_pauses_and_resumes() {
        let mut manager = manager_with(2);
        manager.play_at(0).unwrap();
        manager.on_play_started();
        manager.drain_commands();

        manager.toggle_play();
        assert_eq!(manager.get_state(), PlaybackState::Paused);
        assert_eq!(manager.drain_commands(), vec![MediaCommand::Pause]);

        manager.toggle_play();
        assert_eq!(manager.drain_commands(), vec![MediaCommand::Play]);
        assert_eq!(manager.get_state(), PlaybackState::Loading);
    }

    #[test]
    fn previous_from_first_wraps() {
        let mut manager = manager_with(4);
        manager.play_at(0).unwrap();
        manager.previous().unwrap();
        assert_eq!(manager.cursor(), 3);
    }

    #[test]
    fn next_on_empty_queue_errors() {
        let mut manager = PlaybackManager::default();
        assert_eq!(manager.next(), Err(PlaybackError::QueueEmpty));
        assert_eq!(manager.previous(), Err(PlaybackError::QueueEmpty));
    }

    #[test]
    fn shuffle_next_stays_in_range() {
        let mut manager = manager_with(5);
        manager.toggle_shuffle();
        manager.play_at(0).unwrap();
        for _ in 0..50 {
            manager.next().unwrap();
            assert!(manager.cursor() < 5);
        }
    }

    #[test]
    fn repeat_one_restarts() {
        let mut manager = manager_with(2);
        manager.toggle_repeat();
        manager.play_at(1).unwrap();
        manager.on_play_started();
        manager.drain_commands();

        manager.on_track_end().unwrap();
        assert_eq!(manager.cursor(), 1);
        assert_eq!(
            manager.drain_commands(),
            vec![
                MediaCommand::Seek {
                    position: Duration::ZERO
                },
                MediaCommand::Play
            ]
        );
    }

    #[test]
    fn end_of_last_track_stops_without_repeat() {
        let mut manager = manager_with(2);
        manager.play_at(1).unwrap();
        manager.on_play_started();
        manager.drain_commands();

        manager.on_track_end().unwrap();
        assert_eq!(manager.get_state(), PlaybackState::Paused);
        assert_eq!(manager.cursor(), 1);
        assert!(manager.drain_commands().is_empty());
        assert!(manager.get_current_track().is_some());
    }

    #[test]
    fn end_of_last_track_wraps_with_repeat_all() {
        let mut manager = manager_with(2);
        manager.toggle_repeat();
        manager.toggle_repeat();
        assert_eq!(manager.get_repeat(), RepeatMode::All);

        manager.play_at(1).unwrap();
        manager.on_track_end().unwrap();
        assert_eq!(manager.cursor(), 0);
    }

    #[test]
    fn end_of_middle_track_advances() {
        let mut manager = manager_with(3);
        manager.play_at(0).unwrap();
        manager.on_track_end().unwrap();
        assert_eq!(manager.cursor(), 1);
    }

    #[test]
    fn seek_requires_duration() {
        let mut manager = manager_with(1);
        manager.play_at(0).unwrap();
        manager.drain_commands();

        assert_eq!(
            manager.seek_to_percent(50.0),
            Err(PlaybackError::DurationUnknown)
        );
        assert!(manager.drain_commands().is_empty());

        manager.on_metadata_loaded(Duration::from_secs(200));
        manager.seek_to_percent(25.0).unwrap();
        assert_eq!(
            manager.drain_commands(),
            vec![MediaCommand::Seek {
                position: Duration::from_secs(50)
            }]
        );
        assert_eq!(manager.progress_percent(), Some(25.0));
    }

    #[test]
    fn seek_rejects_non_finite_percent() {
        let mut manager = manager_with(1);
        manager.play_at(0).unwrap();
        manager.on_metadata_loaded(Duration::from_secs(200));
        manager.drain_commands();

        for percent in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                manager.seek_to_percent(percent),
                Err(PlaybackError::InvalidSeek)
            );
        }
        assert!(manager.drain_commands().is_empty());
        assert_eq!(manager.get_position(), Duration::ZERO);

        manager.seek_to_percent(250.0).unwrap();
        assert_eq!(
            manager.drain_commands(),
            vec![MediaCommand::Seek {
                position: Duration::from_secs(200)
            }]
        );
    }

    #[test]
    fn set_volume() {
        let mut manager = PlaybackManager::default();
        manager.set_volume(150);
        assert_eq!(manager.get_volume(), 100);
        assert_eq!(
            manager.drain_commands(),
            vec![MediaCommand::SetVolume { gain: 1.0 }]
        );

        manager.adjust_volume(-5);
        assert_eq!(manager.get_volume(), 95);
    }

    #[test]
    fn removing_current_track_resets_playback() {
        let mut manager = manager_with(3);
        manager.play_at(2).unwrap();
        manager.on_play_started();

        assert!(manager.remove_track(TrackId::new(2)));
        assert_eq!(manager.get_state(), PlaybackState::Idle);
        assert!(manager.get_current_track().is_none());
        assert_eq!(manager.cursor(), 0);
    }

    #[test]
    fn removing_earlier_track_keeps_current() {
        let mut manager = manager_with(3);
        manager.play_at(2).unwrap();

        manager.remove_track(TrackId::new(0));
        assert_eq!(manager.cursor(), 1);
        assert_eq!(manager.get_current_track().unwrap().id, TrackId::new(2));
    }

    #[test]
    fn late_play_confirmation_after_stop_is_ignored() {
        let mut manager = manager_with(1);
        manager.play_at(0).unwrap();
        manager.stop();
        manager.on_play_started();
        assert_eq!(manager.get_state(), PlaybackState::Idle);
    }

    #[test]
    fn media_root_trailing_slash_is_trimmed() {
        let manager = PlaybackManager::new(PlaybackConfig {
            media_root: "http://host/media/".to_string(),
            ..Default::default()
        });
        let track = create_test_track(9);
        assert_eq!(manager.media_url(&track), "http://host/media/9.mp3");
    }
}
