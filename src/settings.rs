//! Stage Settings
//!
//! Every tunable number of the stage in one serde-backed struct. All fields
//! have defaults, so a settings file only lists what it changes:
//!
//! ```json
//! {
//!   "bloom": { "strength": 3.0 },
//!   "particles": { "count": 250, "seed": 7 },
//!   "choreography": { "intro_delay": 0.5 }
//! }
//! ```
//!
//! Values are range-checked by [`StageSettings::validate`]; the loaders call
//! it before returning.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StageError};
use crate::frame_loop::{FrameSteps, PARTICLE_TIME_STEP, RELEASED_SPIN, SCENE_SPIN};
use crate::resources::bloom::{BLOOM_PARAM_MAX, BloomSettings};
use crate::resources::particles::ParticleField;
use crate::resources::tone_mapping::{ToneMappingMode, ToneMappingSettings};
use crate::scene::Camera;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BloomConfig {
    pub strength: f32,
    pub threshold: f32,
    pub radius: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: 5.0,
            threshold: 0.0,
            radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneConfig {
    pub mode: ToneMappingMode,
    pub exposure: f32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            mode: ToneMappingMode::Reinhard,
            exposure: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 65.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 1.5, 1.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub count: usize,
    pub box_size: f32,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            box_size: 15.0,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub spin: f32,
    pub released_spin: f32,
    pub particle_time_step: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            spin: SCENE_SPIN,
            released_spin: RELEASED_SPIN,
            particle_time_step: PARTICLE_TIME_STEP,
        }
    }
}

/// Timing of the intro and the reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChoreographyConfig {
    /// Seconds between attaching the model and the first intro segment.
    pub intro_delay: f64,
    /// Exposure reached by the flare segment.
    pub flare_exposure: f32,
    /// Exposure set when the scrub starts.
    pub settle_exposure: f32,
    /// Length of the cursor scrub (seconds).
    pub scrub_duration: f64,
    /// Per-member delay of the reveal cascade (seconds).
    pub stagger: f64,
    /// Duration of each reveal segment (seconds).
    pub reveal_duration: f64,
    /// Rotation added per axis on every active position-settle tick.
    pub reveal_spin: f32,
    /// Final uniform scale of every model member.
    pub reveal_scale: f32,
    /// Camera position once the reveal settles.
    pub reveal_camera: [f32; 3],
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            intro_delay: 2.0,
            flare_exposure: 4.0_f32.powi(4),
            settle_exposure: 2.0,
            scrub_duration: 5.0,
            stagger: 0.005,
            reveal_duration: 1.2,
            reveal_spin: 0.01,
            reveal_scale: 0.051,
            reveal_camera: [0.0, 1.0, 1.0],
        }
    }
}

/// Complete stage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageSettings {
    pub bloom: BloomConfig,
    pub tone_mapping: ToneConfig,
    pub camera: CameraConfig,
    pub particles: ParticleConfig,
    pub frame: FrameConfig,
    pub choreography: ChoreographyConfig,
}

fn check(ok: bool, what: impl FnOnce() -> String) -> Result<()> {
    if ok { Ok(()) } else { Err(StageError::Config(what())) }
}

fn in_range(name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    check(value.is_finite() && (min..=max).contains(&value), || {
        format!("{name} = {value} is outside [{min}, {max}]")
    })
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    check(value.is_finite() && value >= 0.0, || format!("{name} = {value} must be >= 0"))
}

impl StageSettings {
    /// Parses settings from a JSON string and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        log::debug!("Loaded stage settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        in_range("bloom.strength", self.bloom.strength, 0.0, BLOOM_PARAM_MAX)?;
        in_range("bloom.threshold", self.bloom.threshold, 0.0, BLOOM_PARAM_MAX)?;
        in_range("bloom.radius", self.bloom.radius, 0.0, BLOOM_PARAM_MAX)?;
        in_range("tone_mapping.exposure", self.tone_mapping.exposure, 0.0, f32::MAX)?;

        let cam = &self.camera;
        check(cam.fov > 0.0 && cam.fov < 180.0, || {
            format!("camera.fov = {} must be in (0, 180)", cam.fov)
        })?;
        check(cam.near > 0.0 && cam.far > cam.near, || {
            format!("camera near/far = {}/{} must satisfy 0 < near < far", cam.near, cam.far)
        })?;
        check(cam.position.iter().all(|c| c.is_finite()), || {
            "camera.position must be finite".to_string()
        })?;

        check(self.particles.box_size.is_finite() && self.particles.box_size > 0.0, || {
            format!("particles.box_size = {} must be > 0", self.particles.box_size)
        })?;

        for (name, step) in [
            ("frame.spin", self.frame.spin),
            ("frame.released_spin", self.frame.released_spin),
            ("frame.particle_time_step", self.frame.particle_time_step),
        ] {
            check(step.is_finite(), || format!("{name} must be finite"))?;
        }

        let ch = &self.choreography;
        non_negative("choreography.intro_delay", ch.intro_delay)?;
        non_negative("choreography.scrub_duration", ch.scrub_duration)?;
        non_negative("choreography.stagger", ch.stagger)?;
        non_negative("choreography.reveal_duration", ch.reveal_duration)?;
        in_range("choreography.flare_exposure", ch.flare_exposure, 0.0, f32::MAX)?;
        in_range("choreography.settle_exposure", ch.settle_exposure, 0.0, f32::MAX)?;
        in_range("choreography.reveal_scale", ch.reveal_scale, 0.0, f32::MAX)?;
        check(ch.reveal_spin.is_finite(), || "choreography.reveal_spin must be finite".to_string())?;
        check(ch.reveal_camera.iter().all(|c| c.is_finite()), || {
            "choreography.reveal_camera must be finite".to_string()
        })?;

        Ok(())
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    #[must_use]
    pub fn bloom_settings(&self) -> BloomSettings {
        BloomSettings::new(self.bloom.strength, self.bloom.threshold, self.bloom.radius)
    }

    #[must_use]
    pub fn tone_mapping_settings(&self) -> ToneMappingSettings {
        let mut tone = ToneMappingSettings {
            mode: self.tone_mapping.mode,
            ..ToneMappingSettings::default()
        };
        tone.set_exposure(self.tone_mapping.exposure);
        tone
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new_perspective(self.camera.fov, 1.0, self.camera.near, self.camera.far);
        camera.position = Vec3::from_array(self.camera.position);
        camera
    }

    #[must_use]
    pub fn particle_field(&self) -> ParticleField {
        ParticleField::new(self.particles.count, self.particles.box_size, self.particles.seed)
    }

    #[must_use]
    pub fn frame_steps(&self) -> FrameSteps {
        FrameSteps {
            spin: self.frame.spin,
            released_spin: self.frame.released_spin,
            particle_time: self.frame.particle_time_step,
        }
    }
}
