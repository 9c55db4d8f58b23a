//! Keyboard shortcuts and drag-drop placement

use serde::{Deserialize, Serialize};

/// Volume step for the up/down arrow keys
pub const VOLUME_STEP: i32 = 5;

/// Keys the player reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// Anything else; ignored
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`" "`, `"Space"`, `"ArrowUp"`, ...)
    ///
    /// Case-insensitive; unknown names map to `Other`.
    pub fn parse(name: &str) -> Self {
        if name == " " {
            return Self::Space;
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "space" | "spacebar" => Self::Space,
            "arrowleft" | "left" => Self::ArrowLeft,
            "arrowright" | "right" => Self::ArrowRight,
            "arrowup" | "up" => Self::ArrowUp,
            "arrowdown" | "down" => Self::ArrowDown,
            _ => Self::Other,
        }
    }
}

/// Target index for a dragged queue row
///
/// `row_midpoints` are the vertical midpoints of every row *except* the one
/// being dragged, top to bottom. The row lands before the first row whose
/// midpoint is below the pointer, or at the end.
pub fn drop_index(row_midpoints: &[f64], pointer_y: f64) -> usize {
    row_midpoints
        .iter()
        .position(|&mid| pointer_y < mid)
        .unwrap_or(row_midpoints.len())
}
