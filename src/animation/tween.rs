//! Typed animation targets, values and side effects.
//!
//! A segment names *what* it animates with a [`TweenTarget`] and *towards
//! what* with a [`TweenValue`]; the pairing is checked when the timeline is
//! built. The engine reaches the outside world only through [`TweenWorld`].

use bitflags::bitflags;
use glam::{Vec3, Vec4};

use crate::animation::values::Interpolatable;
use crate::scene::{LightKey, MaterialKey, NodeKey};

bitflags! {
    /// Vector components a segment is allowed to touch.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const XYZ = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::XYZ
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeProperty {
    Position,
    /// XYZ Euler angles.
    Rotation,
    Scale,
}

/// Enumerated property path of everything the choreography can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Node(NodeKey, NodeProperty),
    CameraPosition,
    Exposure,
    Cursor,
    LightIntensity(LightKey),
    MaterialColor(MaterialKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Vector3,
    Color,
}

impl TweenTarget {
    /// Value kind the target reads and writes.
    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Node(..) | Self::CameraPosition => ValueKind::Vector3,
            Self::Exposure | Self::Cursor | Self::LightIntensity(_) => ValueKind::Scalar,
            Self::MaterialColor(_) => ValueKind::Color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector3(Vec3),
    /// Linear RGBA.
    Color(Vec4),
}

impl TweenValue {
    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vector3(_) => ValueKind::Vector3,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Blends `start` towards `end` by `t`.
    ///
    /// For vectors only the components in `axes` move; the rest keep the
    /// start value. Returns `None` when the kinds differ.
    #[must_use]
    pub fn blend(start: Self, end: Self, t: f32, axes: Axes) -> Option<Self> {
        match (start, end) {
            (Self::Scalar(a), Self::Scalar(b)) => Some(Self::Scalar(f32::interpolate_linear(a, b, t))),
            (Self::Vector3(a), Self::Vector3(b)) => {
                let full = Vec3::interpolate_linear(a, b, t);
                let pick = |axis: Axes, moved: f32, kept: f32| if axes.contains(axis) { moved } else { kept };
                Some(Self::Vector3(Vec3::new(
                    pick(Axes::X, full.x, a.x),
                    pick(Axes::Y, full.y, a.y),
                    pick(Axes::Z, full.z, a.z),
                )))
            }
            (Self::Color(a), Self::Color(b)) => Some(Self::Color(Vec4::interpolate_linear(a, b, t))),
            _ => None,
        }
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        Self::Vector3(v)
    }
}

impl From<Vec4> for TweenValue {
    fn from(v: Vec4) -> Self {
        Self::Color(v)
    }
}

/// Side effect fired by a segment hook or a finished timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideEffect {
    /// Overwrite tone-mapping exposure.
    SetExposure(f32),
    /// Take a node (and its subtree) out of the scene.
    RemoveNode(NodeKey),
    /// Latch the camera-release flag of the frame loop.
    ReleaseCamera,
    /// Add `delta` to a node's Euler rotation.
    Spin { node: NodeKey, delta: Vec3 },
    /// Named point in the choreography, logged by the host.
    Milestone(&'static str),
}

/// Everything a timeline may read, write or trigger.
pub trait TweenWorld {
    /// Current value of `target`, `None` if it no longer exists.
    fn read(&self, target: TweenTarget) -> Option<TweenValue>;

    /// Writes `value`; returns `false` if the target no longer exists.
    fn write(&mut self, target: TweenTarget, value: TweenValue) -> bool;

    fn apply(&mut self, effect: &SideEffect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_blend_leaves_other_axes() {
        let start = TweenValue::Vector3(Vec3::new(7.0, 1.5, 1.5));
        let end = TweenValue::Vector3(Vec3::new(0.0, 5.0, 6.0));
        let Some(TweenValue::Vector3(v)) = TweenValue::blend(start, end, 1.0, Axes::Y | Axes::Z) else {
            panic!("kind mismatch");
        };
        assert_eq!(v, Vec3::new(7.0, 5.0, 6.0));
    }

    #[test]
    fn blend_rejects_mixed_kinds() {
        assert!(TweenValue::blend(1.0.into(), Vec3::ONE.into(), 0.5, Axes::XYZ).is_none());
    }

    #[test]
    fn color_blends_componentwise() {
        let a = TweenValue::Color(Vec4::new(0.0, 0.0, 1.0, 1.0));
        let b = TweenValue::Color(Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(
            TweenValue::blend(a, b, 0.5, Axes::XYZ),
            Some(TweenValue::Color(Vec4::new(0.5, 0.5, 1.0, 1.0)))
        );
    }
}
