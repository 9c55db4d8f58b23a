//! Plain-text rendering of view models

use std::io::Write;
use tempo_controller::{
    GridItem, Notification, NowPlaying, PlayIcon, PlayerBar, PlaylistCard, PlaylistDetail,
    QueueItem, Renderer, View, VolumeIcon,
};
use tempo_playback::RepeatMode;
use tracing::warn;

/// Writes each render target as a few lines of text
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn notification(&mut self, notification: &Notification) {
        let tag = if notification.is_error() { "!" } else { "*" };
        self.line(format_args!("{} {}", tag, notification.message));
    }

    pub fn prompt(&mut self, question: &str) {
        self.line(format_args!("? {} [yes/no]", question));
    }

    pub fn message(&mut self, text: &str) {
        self.line(format_args!("{}", text));
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!(error = %e, "Failed to write output");
        }
    }
}

fn marker(is_current: bool, is_playing: bool) -> &'static str {
    match (is_current, is_playing) {
        (true, true) => ">",
        (true, false) => "|",
        _ => " ",
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn grid(&mut self, items: &[GridItem]) {
        self.line(format_args!("== Library ({}) ==", items.len()));
        if items.is_empty() {
            self.line(format_args!("   (no tracks)"));
        }
        for item in items {
            self.line(format_args!(
                "{} #{:<4} {} - {}",
                marker(item.is_current, item.is_playing),
                item.track_id.get(),
                item.title,
                item.artist
            ));
        }
    }

    fn queue(&mut self, items: &[QueueItem]) {
        self.line(format_args!("== Queue ({}) ==", items.len()));
        for item in items {
            self.line(format_args!(
                "{} [{}] {} - {}",
                marker(item.is_current, false),
                item.index,
                item.title,
                item.artist
            ));
        }
    }

    fn now_playing(&mut self, now: Option<&NowPlaying>) {
        match now {
            Some(now) => self.line(format_args!("Now playing: {} - {}", now.title, now.artist)),
            None => self.line(format_args!("Now playing: -")),
        }
    }

    fn player_bar(&mut self, bar: &PlayerBar) {
        let state = match bar.play_icon {
            PlayIcon::Play => "paused",
            PlayIcon::Pause => "playing",
        };
        let repeat = match bar.repeat {
            RepeatMode::Off => "off",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        };
        let volume = match bar.volume_icon {
            VolumeIcon::Mute => "muted",
            VolumeIcon::Low | VolumeIcon::High => "",
        };
        self.line(format_args!(
            "[{}] {} / {} ({:.0}%)  shuffle:{}  repeat:{}  volume:{}% {}",
            state,
            bar.current_time,
            bar.total_time,
            bar.progress_percent,
            if bar.shuffle_active { "on" } else { "off" },
            repeat,
            bar.volume,
            volume
        ));
    }

    fn playlists(&mut self, cards: &[PlaylistCard]) {
        self.line(format_args!("== Playlists ({}) ==", cards.len()));
        if cards.is_empty() {
            self.line(format_args!("   (none yet, try `create <name>`)"));
        }
        for (slot, card) in cards.iter().enumerate() {
            self.line(format_args!("  [{}] {} ({})", slot, card.name, card.count_label));
        }
    }

    fn playlist(&mut self, detail: Option<&PlaylistDetail>) {
        let Some(detail) = detail else {
            self.line(format_args!("(playlist no longer exists)"));
            return;
        };
        self.line(format_args!("== {} ==", detail.name));
        if detail.songs.is_empty() {
            self.line(format_args!("   (empty)"));
        }
        for song in &detail.songs {
            self.line(format_args!("  [{}] {} - {}", song.index, song.title, song.artist));
        }
    }

    fn navigation(&mut self, view: View) {
        let name = match view {
            View::Home => "Home",
            View::Playlists => "Playlists",
            View::Playlist(_) => "Playlist",
        };
        self.line(format_args!("-- {} --", name));
    }

    fn upload_progress(&mut self, percent: Option<u8>) {
        if let Some(percent) = percent {
            self.line(format_args!("Uploading... {}%", percent));
        }
    }
}
