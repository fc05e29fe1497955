use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How far the cached keyframe index is scanned before falling back to a
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe interval a track was sampled in.
///
/// Scrubbing mostly moves time by small amounts, so the next lookup starts
/// next to the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    /// One value per keyframe; three (in-tangent, value, out-tangent) for
    /// [`InterpolationMode::CubicSpline`].
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Number of values `times` calls for under the interpolation mode.
    #[must_use]
    pub fn expected_values(&self) -> usize {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.times.len() * 3,
            _ => self.times.len(),
        }
    }

    /// Whether the value count matches the keyframe count. Sampling a track
    /// that is not well formed yields `None`.
    #[inline]
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.values.len() == self.expected_values()
    }

    /// Describes what is wrong with the keyframe layout, if anything.
    #[must_use]
    pub fn shape_error(&self) -> Option<String> {
        if !self.is_well_formed() {
            return Some(format!(
                "{} keyframes need {} values, found {}",
                self.times.len(),
                self.expected_values(),
                self.values.len()
            ));
        }
        if self.times.iter().any(|t| !t.is_finite()) {
            return Some("keyframe time is not finite".to_string());
        }
        if self.times.windows(2).any(|w| w[1] < w[0]) {
            return Some("keyframe times decrease".to_string());
        }
        None
    }

    /// Stateless sample via binary search. `None` for an empty or
    /// malformed track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() || !self.is_well_formed() {
            return None;
        }
        let next = self.times.partition_point(|&t| t <= time);
        Some(self.sample_at_frame(next.saturating_sub(1), time))
    }

    /// Sample using `cursor` as the search hint, updating it in place.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        if len == 0 || !self.is_well_formed() {
            return None;
        }
        if len == 1 {
            return Some(*self.value_at(0));
        }

        let index = self
            .scan_from(cursor.last_index.min(len - 1), time)
            .unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));
        cursor.last_index = index;

        Some(self.sample_at_frame(index, time))
    }

    /// Linear scan around `start` in the direction time moved.
    fn scan_from(&self, start: usize, time: f32) -> Option<usize> {
        let len = self.times.len();
        if time >= self.times[start] {
            for idx in start..=(start + MAX_SCAN_OFFSET) {
                if idx >= len - 1 {
                    return Some(len - 1);
                }
                if time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
            None
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&idx| time >= self.times[idx])
        }
    }

    fn value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return *self.value_at(len - 1);
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => *self.value_at(index),
            InterpolationMode::Linear => T::interpolate_linear(*self.value_at(index), *self.value_at(next), t),
            InterpolationMode::CubicSpline => {
                let a = index * 3;
                let b = next * 3;
                T::interpolate_cubic(
                    self.values[a + 1],
                    self.values[a + 2],
                    self.values[b],
                    self.values[b + 1],
                    t,
                    dt,
                )
            }
        }
    }
}
