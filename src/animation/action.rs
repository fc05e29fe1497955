use std::sync::Arc;

use crate::animation::binder::PropertyBinding;
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;

/// Sampled value of one track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(glam::Vec3),
    Quaternion(glam::Quat),
}

/// Playback state of one clip.
///
/// Actions play once and hold their last pose: local time is clamped to
/// `[0, duration]` and the action parks itself at either end.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    /// Set once local time hits either end of the clip.
    pub finished: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            finished: false,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Advances local time by `dt`, clamping at the clip ends.
    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt;
        if self.time >= duration || self.time < 0.0 {
            self.time = self.time.clamp(0.0, duration);
            self.finished = true;
        }
    }

    /// Back to the first frame, ready to play again.
    pub fn rewind(&mut self) {
        self.time = 0.0;
        self.finished = false;
    }

    /// Samples track `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion),
        }
    }
}
