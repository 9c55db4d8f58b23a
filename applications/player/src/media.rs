//! Headless media engine
//!
//! Stands in for an audio output. It tracks what a real engine would
//! (source, play state, position, gain), logs every command and answers
//! with the callbacks the controller expects.

use std::time::Duration;
use tempo_controller::UiEvent;
use tempo_playback::MediaCommand;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    source: Option<String>,
    playing: bool,
    position: Duration,
    duration: Option<Duration>,
    gain: f32,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            gain: 1.0,
            ..Self::default()
        }
    }

    /// Execute one command and return the engine's callbacks
    ///
    /// `duration_hint` is the track length from the catalog; on `Load` it is
    /// reported as loaded metadata, since nothing is decoded here.
    pub fn apply(&mut self, command: &MediaCommand, duration_hint: Option<u32>) -> Vec<UiEvent> {
        match command {
            MediaCommand::Load { url } => {
                info!(url = %url, "Loading source");
                self.source = Some(url.clone());
                self.playing = false;
                self.position = Duration::ZERO;
                self.duration = duration_hint.map(|secs| Duration::from_secs(u64::from(secs)));

                self.duration
                    .map(|d| UiEvent::MetadataLoaded {
                        duration_secs: d.as_secs_f64(),
                    })
                    .into_iter()
                    .collect()
            }
            MediaCommand::Play => {
                if self.source.is_none() {
                    return vec![UiEvent::PlayRejected {
                        reason: "no source loaded".to_string(),
                    }];
                }
                debug!("Play");
                self.playing = true;
                vec![UiEvent::PlayStarted]
            }
            MediaCommand::Pause => {
                debug!("Pause");
                self.playing = false;
                Vec::new()
            }
            MediaCommand::Seek { position } => {
                debug!(position_ms = position.as_millis() as u64, "Seek");
                self.position = *position;
                vec![UiEvent::TimeUpdate {
                    position_secs: position.as_secs_f64(),
                }]
            }
            MediaCommand::SetVolume { gain } => {
                debug!(gain, "Set volume");
                self.gain = *gain;
                Vec::new()
            }
        }
    }

    /// Advance the clock while playing
    ///
    /// Reaching the known duration ends the track.
    pub fn advance(&mut self, by: Duration) -> Vec<UiEvent> {
        if !self.playing {
            return Vec::new();
        }

        self.position = self.position.saturating_add(by);
        let mut events = vec![UiEvent::TimeUpdate {
            position_secs: self.position.as_secs_f64(),
        }];

        if self.duration.is_some_and(|d| self.position >= d) {
            events.extend(self.finish());
        }
        events
    }

    /// End the current track now
    pub fn finish(&mut self) -> Vec<UiEvent> {
        if self.source.is_none() {
            return Vec::new();
        }
        self.playing = false;
        vec![UiEvent::TrackEnded]
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}
