use glam::{Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;
use crate::errors::{Result, StageError};

/// Node property a track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
}

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            Self::Vector3(t) => t.end_time(),
            Self::Quaternion(t) => t.end_time(),
        }
    }

    #[must_use]
    pub fn shape_error(&self) -> Option<String> {
        match self {
            Self::Vector3(t) => t.shape_error(),
            Self::Quaternion(t) => t.shape_error(),
        }
    }
}

/// Track metadata plus its keyframes.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    /// Checks the keyframe layout before the track is bound.
    pub fn validate(&self) -> Result<()> {
        match self.data.shape_error() {
            None => Ok(()),
            Some(reason) => Err(StageError::AssetShape {
                node: self.meta.node_name.clone(),
                reason: format!("{:?} track: {reason}", self.meta.target),
            }),
        }
    }
}

/// A named skeletal/transform clip as delivered by the asset loader.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Duration is the latest keyframe over all tracks.
    #[must_use]
    pub fn new(name: &str, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(|t| t.data.end_time()).fold(0.0_f32, f32::max);
        Self {
            name: name.to_string(),
            duration,
            tracks,
        }
    }
}
