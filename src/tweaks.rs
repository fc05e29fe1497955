//! Debug sliders.
//!
//! Compiled into debug builds and into release builds with the `tweaks`
//! feature. Each [`Tweak`] carries a value that is clamped into the slider
//! range before it reaches the stage; without this module those values stay
//! at their settings or choreographed values.

use std::ops::RangeInclusive;

use glam::Vec3;

use crate::animation::cursor::CURSOR_MAX;
use crate::resources::bloom::BLOOM_PARAM_MAX;
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tweak {
    /// Scrub position; seeks the mixer.
    Cursor(f32),
    PointLightIntensity(f32),
    /// Uniform scale of the glow object.
    GlowScale(f32),
    BloomStrength(f32),
    BloomThreshold(f32),
    BloomRadius(f32),
    /// Perceptual exposure, applied as `value^4`.
    Exposure(f32),
}

impl Tweak {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cursor(_) => "progress",
            Self::PointLightIntensity(_) => "intensity",
            Self::GlowScale(_) => "scale",
            Self::BloomStrength(_) => "strength",
            Self::BloomThreshold(_) => "threshold",
            Self::BloomRadius(_) => "radius",
            Self::Exposure(_) => "exposure",
        }
    }

    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::Cursor(_) => 0.0..=CURSOR_MAX,
            Self::PointLightIntensity(_) | Self::GlowScale(_) => 0.0..=10.0,
            Self::BloomStrength(_) | Self::BloomThreshold(_) | Self::BloomRadius(_) => 0.0..=BLOOM_PARAM_MAX,
            Self::Exposure(_) => 0.1..=6.0,
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        match self {
            Self::Cursor(v)
            | Self::PointLightIntensity(v)
            | Self::GlowScale(v)
            | Self::BloomStrength(v)
            | Self::BloomThreshold(v)
            | Self::BloomRadius(v)
            | Self::Exposure(v) => v,
        }
    }

    /// Same slider with its value clamped into [`Tweak::range`]; NaN goes to
    /// the lower bound.
    #[must_use]
    pub fn clamped(self) -> Self {
        let range = self.range();
        let v = self.value();
        let v = if v.is_nan() { *range.start() } else { v.clamp(*range.start(), *range.end()) };
        match self {
            Self::Cursor(_) => Self::Cursor(v),
            Self::PointLightIntensity(_) => Self::PointLightIntensity(v),
            Self::GlowScale(_) => Self::GlowScale(v),
            Self::BloomStrength(_) => Self::BloomStrength(v),
            Self::BloomThreshold(_) => Self::BloomThreshold(v),
            Self::BloomRadius(_) => Self::BloomRadius(v),
            Self::Exposure(_) => Self::Exposure(v),
        }
    }
}

impl Stage {
    /// Applies one slider change and returns it as applied.
    pub fn apply_tweak(&mut self, tweak: Tweak) -> Tweak {
        let tweak = tweak.clamped();
        let props = *self.props();
        match tweak {
            Tweak::Cursor(v) => self.seek(v),
            Tweak::PointLightIntensity(v) => {
                if let Some(light) = self.scene.light_mut(props.point_light) {
                    light.intensity = v;
                }
            }
            Tweak::GlowScale(v) => {
                if let Some(node) = self.scene.get_node_mut(props.glow) {
                    node.transform.scale = Vec3::splat(v);
                }
            }
            Tweak::BloomStrength(v) => self.bloom_mut().set_strength(v),
            Tweak::BloomThreshold(v) => self.bloom_mut().set_threshold(v),
            Tweak::BloomRadius(v) => self.bloom_mut().set_radius(v),
            Tweak::Exposure(v) => self.tone.set_exposure_perceptual(v),
        }
        log::debug!("Tweak {} = {}", tweak.name(), tweak.value());
        tweak
    }
}
