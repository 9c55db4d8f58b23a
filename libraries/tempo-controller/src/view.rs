//! Typed view models
//!
//! One model per render target. A rendering layer reads these instead of
//! reaching into controller state.

use crate::effects::View;
use serde::{Deserialize, Serialize};
use tempo_core::{artwork_or_placeholder, ArtworkSlot, Playlist, PlaylistId, Track, TrackId};
use tempo_playback::RepeatMode;

/// Library grid card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
    pub artwork: String,
    pub is_current: bool,
    pub is_playing: bool,
}

impl GridItem {
    pub fn new(track: &Track, current: Option<TrackId>, playing: bool) -> Self {
        let is_current = current == Some(track.id);
        Self {
            track_id: track.id,
            title: track.title.clone(),
            artist: track.display_artist().to_string(),
            artwork: artwork_or_placeholder(track.artwork.as_deref(), track.id, ArtworkSlot::GridCard),
            is_current,
            is_playing: is_current && playing,
        }
    }
}

/// Play queue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub index: usize,
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
    pub artwork: String,
    pub is_current: bool,
}

impl QueueItem {
    pub fn new(index: usize, track: &Track, is_current: bool) -> Self {
        Self {
            index,
            track_id: track.id,
            title: track.title.clone(),
            artist: track.display_artist().to_string(),
            artwork: artwork_or_placeholder(track.artwork.as_deref(), track.id, ArtworkSlot::QueueRow),
            is_current,
        }
    }
}

/// Playlist summary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCard {
    pub playlist_id: PlaylistId,
    pub name: String,
    pub song_count: usize,
    pub count_label: String,
}

impl From<&Playlist> for PlaylistCard {
    fn from(playlist: &Playlist) -> Self {
        let song_count = playlist.len();
        Self {
            playlist_id: playlist.id,
            name: playlist.name.clone(),
            song_count,
            count_label: if song_count == 1 {
                "1 song".to_string()
            } else {
                format!("{} songs", song_count)
            },
        }
    }
}

/// Row in an open playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongItem {
    pub index: usize,
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
    pub artwork: String,
}

/// An open playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    pub playlist_id: PlaylistId,
    pub name: String,
    pub songs: Vec<PlaylistSongItem>,
}

impl From<&Playlist> for PlaylistDetail {
    fn from(playlist: &Playlist) -> Self {
        Self {
            playlist_id: playlist.id,
            name: playlist.name.clone(),
            songs: playlist
                .songs
                .iter()
                .enumerate()
                .map(|(index, song)| PlaylistSongItem {
                    index,
                    track_id: song.id,
                    title: song.title.clone(),
                    artist: song.display_artist().to_string(),
                    artwork: artwork_or_placeholder(
                        song.artwork.as_deref(),
                        song.id,
                        ArtworkSlot::PlaylistRow,
                    ),
                })
                .collect(),
        }
    }
}

/// Current track panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
    pub artwork: String,
}

impl From<&Track> for NowPlaying {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id,
            title: track.title.clone(),
            artist: track.display_artist().to_string(),
            artwork: artwork_or_placeholder(track.artwork.as_deref(), track.id, ArtworkSlot::NowPlaying),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    Mute,
    Low,
    High,
}

impl VolumeIcon {
    /// 0 is mute, below 50 is low
    pub fn for_level(level: u8) -> Self {
        match level {
            0 => Self::Mute,
            1..=49 => Self::Low,
            _ => Self::High,
        }
    }
}

/// Transport controls and progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBar {
    pub play_icon: PlayIcon,
    pub shuffle_active: bool,
    pub repeat: RepeatMode,
    pub repeat_active: bool,
    pub volume: u8,
    pub volume_icon: VolumeIcon,
    pub progress_percent: f64,
    pub current_time: String,
    pub total_time: String,
}

/// `m:ss`; unknown durations show `0:00`
pub fn format_time(seconds: Option<f64>) -> String {
    let seconds = match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => s as u64,
        _ => 0,
    };
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Model for one render target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "model", rename_all = "camelCase")]
pub enum ViewModel {
    Grid(Vec<GridItem>),
    Queue(Vec<QueueItem>),
    NowPlaying(Option<NowPlaying>),
    PlayerBar(PlayerBar),
    Playlists(Vec<PlaylistCard>),
    /// `None` when the playlist no longer exists
    Playlist(Option<PlaylistDetail>),
    Navigation(View),
    /// `None` hides the progress indicator
    UploadProgress(Option<u8>),
}

/// Consumer of view models
///
/// Hosts implement this to draw; `Controller::render` dispatches one
/// target to the matching method.
pub trait Renderer {
    fn grid(&mut self, items: &[GridItem]);
    fn queue(&mut self, items: &[QueueItem]);
    fn now_playing(&mut self, now: Option<&NowPlaying>);
    fn player_bar(&mut self, bar: &PlayerBar);
    fn playlists(&mut self, cards: &[PlaylistCard]);
    fn playlist(&mut self, detail: Option<&PlaylistDetail>);
    fn navigation(&mut self, view: View);

    /// Upload indicator; does nothing unless overridden
    fn upload_progress(&mut self, _percent: Option<u8>) {}
}

impl ViewModel {
    /// Hand this model to `renderer`
    pub fn render_into<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        match self {
            Self::Grid(items) => renderer.grid(items),
            Self::Queue(items) => renderer.queue(items),
            Self::NowPlaying(now) => renderer.now_playing(now.as_ref()),
            Self::PlayerBar(bar) => renderer.player_bar(bar),
            Self::Playlists(cards) => renderer.playlists(cards),
            Self::Playlist(detail) => renderer.playlist(detail.as_ref()),
            Self::Navigation(view) => renderer.navigation(*view),
            Self::UploadProgress(percent) => renderer.upload_progress(*percent),
        }
    }
}
