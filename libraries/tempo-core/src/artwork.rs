//! Placeholder artwork
//!
//! Tracks without cover art get a gradient tile whose colours are picked
//! from a fixed palette by track id, so the same track always renders the
//! same tile. Output is a URL-encoded SVG data URI.

use crate::types::TrackId;

/// Palette used for placeholder gradients (hex, no leading `#`)
pub const PALETTE: [&str; 15] = [
    "fa2d48", "ff3b30", "007aff", "30d158", "ff9500", "667eea", "764ba2", "f093fb", "f5576c",
    "4facfe", "00f2fe", "a8edea", "fed6e3", "ffecd2", "fcb69f",
];

/// Where the artwork is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkSlot {
    /// Library grid card (180px)
    GridCard,
    /// Play queue row (40px)
    QueueRow,
    /// Row inside an open playlist (40px)
    PlaylistRow,
    /// Now-playing thumbnail in the player bar (56px, fixed colours)
    NowPlaying,
}

/// Palette colour for a seed
pub fn palette_color(seed: u64) -> &'static str {
    PALETTE[(seed % PALETTE.len() as u64) as usize]
}

/// Deterministic placeholder for a track in the given slot
pub fn placeholder_artwork(id: TrackId, slot: ArtworkSlot) -> String {
    let seed = id.get();
    match slot {
        ArtworkSlot::GridCard => format!(
            "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='180' height='180' viewBox='0 0 180 180'%3E\
             {defs}%3Crect width='180' height='180' rx='12' fill='url(%23grad{seed})'/%3E\
             %3Cg transform='translate(90,90)'%3E%3Ccircle cx='0' cy='0' r='25' fill='none' stroke='white' stroke-width='2' opacity='0.4'/%3E\
             %3Cpath d='M-10,-10 L10,0 L-10,10 Z' fill='white' opacity='0.8'/%3E%3C/g%3E%3C/svg%3E",
            defs = gradient_defs(&format!("grad{seed}"), seed, seed + 1),
        ),
        ArtworkSlot::QueueRow => small_tile(&format!("queueGrad{seed}"), seed, seed + 2),
        ArtworkSlot::PlaylistRow => small_tile(&format!("grad{seed}"), seed, seed + 1),
        ArtworkSlot::NowPlaying => format!(
            "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='56' height='56' viewBox='0 0 56 56'%3E\
             {defs}%3Crect width='56' height='56' rx='6' fill='url(%23playerGrad)'/%3E\
             %3Cg transform='translate(28,28)'%3E%3Ccircle cx='0' cy='0' r='12' fill='none' stroke='white' stroke-width='1.5' opacity='0.4'/%3E\
             %3Cpath d='M-5,-5 L5,0 L-5,5 Z' fill='white' opacity='0.8'/%3E%3C/g%3E%3C/svg%3E",
            defs = gradient_defs_with("playerGrad", "fa2d48", "ff3b30"),
        ),
    }
}

/// Artwork to display: the track's own cover, or its placeholder
pub fn artwork_or_placeholder(artwork: Option<&str>, id: TrackId, slot: ArtworkSlot) -> String {
    match artwork {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => placeholder_artwork(id, slot),
    }
}

fn small_tile(gradient_id: &str, from_seed: u64, to_seed: u64) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='40' height='40' viewBox='0 0 40 40'%3E\
         {defs}%3Crect width='40' height='40' rx='6' fill='url(%23{gradient_id})'/%3E\
         %3Cg transform='translate(20,20)'%3E%3Cpath d='M-6,-6 L6,0 L-6,6 Z' fill='white' opacity='0.8'/%3E%3C/g%3E%3C/svg%3E",
        defs = gradient_defs(gradient_id, from_seed, to_seed),
    )
}

fn gradient_defs(gradient_id: &str, from_seed: u64, to_seed: u64) -> String {
    gradient_defs_with(gradient_id, palette_color(from_seed), palette_color(to_seed))
}

fn gradient_defs_with(gradient_id: &str, from: &str, to: &str) -> String {
    format!(
        "%3Cdefs%3E%3ClinearGradient id='{gradient_id}' x1='0%25' y1='0%25' x2='100%25' y2='100%25'%3E\
         %3Cstop offset='0%25' style='stop-color:%23{from};stop-opacity:1' /%3E\
         %3Cstop offset='100%25' style='stop-color:%23{to};stop-opacity:1' /%3E\
         %3C/linearGradient%3E%3C/defs%3E"
    )
}
