//! Bloom Post-Processing Configuration
//!
//! Settings for the extraction pipeline that turns the masked scene into the
//! bloom texture: a luminance threshold followed by a blur whose spread is
//! controlled by `radius`, scaled by `strength`.
//!
//! # GPU Uniform Structs
//!
//! - [`BloomUniforms`]: threshold / blur parameters for the extraction chain.
//! - [`CompositeUniforms`]: how base and bloom textures are summed.

use bytemuck::{Pod, Zeroable};

use crate::resources::uniforms::UniformBlock;

/// Upper bound of every bloom slider.
pub const BLOOM_PARAM_MAX: f32 = 50.0;

/// GPU uniform data for the extraction chain.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BloomUniforms {
    pub strength: f32,
    pub threshold: f32,
    pub radius: f32,
    pub(crate) __pad: u32,
}

/// GPU uniform data for the final full-screen composite.
///
/// `final = base + bloom_weight * bloom`, then tone mapping with `exposure`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CompositeUniforms {
    pub bloom_weight: f32,
    pub exposure: f32,
    pub tone_mapping_mode: u32,
    pub(crate) __pad: u32,
}

/// Bloom configuration (pure data + version tracking).
#[derive(Debug, Clone)]
pub struct BloomSettings {
    pub enabled: bool,
    pub(crate) uniforms: UniformBlock<BloomUniforms>,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self::new(5.0, 0.0, 0.0)
    }
}

impl BloomSettings {
    #[must_use]
    pub fn new(strength: f32, threshold: f32, radius: f32) -> Self {
        let mut settings = Self {
            enabled: true,
            uniforms: UniformBlock::new(BloomUniforms::default()),
        };
        settings.set_strength(strength);
        settings.set_threshold(threshold);
        settings.set_radius(radius);
        settings
    }

    #[inline]
    #[must_use]
    pub fn strength(&self) -> f32 {
        self.uniforms.read().strength
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.uniforms.read().threshold
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.uniforms.read().radius
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.uniforms.write().strength = strength.clamp(0.0, BLOOM_PARAM_MAX);
    }

    /// Luminance below which pixels do not bloom.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.uniforms.write().threshold = threshold.clamp(0.0, BLOOM_PARAM_MAX);
    }

    /// Blur spread; larger values produce softer, wider bloom.
    pub fn set_radius(&mut self, radius: f32) {
        self.uniforms.write().radius = radius.clamp(0.0, BLOOM_PARAM_MAX);
    }

    #[must_use]
    pub fn uniforms(&self) -> &UniformBlock<BloomUniforms> {
        &self.uniforms
    }
}
