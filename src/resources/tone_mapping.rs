//! Tone Mapping Configuration
//!
//! Exposure is the only tone-mapping parameter the choreography touches: it
//! is blacked out, flared up to `4^4` and settled back to 2 during the intro.

use serde::{Deserialize, Serialize};

/// Tone mapping algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMappingMode {
    /// No tone mapping (linear passthrough)
    Linear,
    /// Reinhard operator (classic, soft highlights)
    #[default]
    Reinhard,
    /// ACES Filmic (industry standard)
    #[serde(rename = "aces_filmic")]
    ACESFilmic,
}

impl ToneMappingMode {
    /// Stable id written into the composite uniforms.
    #[must_use]
    pub fn shader_id(self) -> u32 {
        match self {
            Self::Linear => 0,
            Self::Reinhard => 1,
            Self::ACESFilmic => 2,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Reinhard => "Reinhard",
            Self::ACESFilmic => "ACES Filmic",
        }
    }
}

/// Tone mapping configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneMappingSettings {
    pub mode: ToneMappingMode,
    /// Exposure multiplier applied before the operator.
    pub exposure: f32,
}

impl Default for ToneMappingSettings {
    fn default() -> Self {
        Self {
            mode: ToneMappingMode::default(),
            exposure: 1.0,
        }
    }
}

impl ToneMappingSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        self.exposure = exposure.max(0.0);
    }

    /// Sets exposure from a perceptual slider value (`value^4`).
    pub fn set_exposure_perceptual(&mut self, value: f32) {
        self.set_exposure(value.powi(4));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perceptual_exposure_is_fourth_power() {
        let mut tone = ToneMappingSettings::new();
        tone.set_exposure_perceptual(2.0);
        assert!((tone.exposure - 16.0).abs() < 1e-6);
    }

    #[test]
    fn exposure_never_negative() {
        let mut tone = ToneMappingSettings::new();
        tone.set_exposure(-3.0);
        assert_eq!(tone.exposure, 0.0);
    }
}
