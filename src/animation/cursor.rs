//! Scrub position of the model's skeletal animation.

/// Largest cursor value; the scrub stops just short of the clip's last frame.
pub const CURSOR_MAX: f32 = 0.999;

/// Normalized playback position in `[0, CURSOR_MAX]`.
///
/// The mixer time is derived from it, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Cursor(f32);

impl Cursor {
    #[must_use]
    pub fn new(value: f32) -> Self {
        let mut cursor = Self::default();
        cursor.set(value);
        cursor
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Stores `value` clamped into range; NaN maps to 0.
    pub fn set(&mut self, value: f32) {
        self.0 = if value.is_nan() { 0.0 } else { value.clamp(0.0, CURSOR_MAX) };
    }

    /// Mixer playback position for a clip of `clip_duration` seconds.
    #[inline]
    #[must_use]
    pub fn playback_time(self, clip_duration: f32) -> f32 {
        self.0 * clip_duration
    }
}
