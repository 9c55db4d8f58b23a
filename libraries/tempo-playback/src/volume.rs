//! Volume control
//!
//! Volume is a 0-100% slider value. The media engine takes a linear
//! gain, so 100% maps to 1.0 and 0% to silence.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped to 0-100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level, clamping to 0-100
    pub fn set_level(&mut self, level: i32) {
        self.level = level.clamp(0, 100) as u8;
    }

    /// Shift the level by `delta` percentage points, clamping to 0-100
    pub fn adjust(&mut self, delta: i32) {
        self.set_level(i32::from(self.level) + delta);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain for the media engine (0.0-1.0)
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}
