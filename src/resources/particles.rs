//! Rising particle field.
//!
//! A fixed set of points scattered over a square box at a constant height,
//! each with a random speed factor. The vertex stage lifts every point by
//! `(u_time * 0.4 + 15) * (rand + 0.1)` and wraps it into a 12-unit band, so
//! the CPU side only has to advance `u_time`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::resources::uniforms::UniformBlock;

/// Floor height of the particle box.
pub const PARTICLE_FLOOR: f32 = -3.0;
/// Height of the band particles wrap around in.
pub const PARTICLE_BAND: f32 = 12.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleUniforms {
    pub u_time: f32,
    pub(crate) __pad: [u32; 3],
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    /// Per-point speed factor in [0, 1).
    pub speeds: Vec<f32>,
    pub(crate) uniforms: UniformBlock<ParticleUniforms>,
}

impl ParticleField {
    /// Scatters `count` points over a `box_size` square.
    ///
    /// Uses a fixed seed so runs are reproducible.
    #[must_use]
    pub fn new(count: usize, box_size: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(Vec3::new(
                (rng.random_range(0.0..1.0_f32) - 0.5) * box_size,
                PARTICLE_FLOOR,
                (rng.random_range(0.0..1.0_f32) - 0.5) * box_size,
            ));
            speeds.push(rng.random_range(0.0..1.0_f32));
        }

        Self {
            positions,
            speeds,
            uniforms: UniformBlock::new(ParticleUniforms::default()),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.uniforms.read().u_time
    }

    pub fn advance_time(&mut self, step: f32) {
        self.uniforms.write().u_time += step;
    }

    #[must_use]
    pub fn uniforms(&self) -> &UniformBlock<ParticleUniforms> {
        &self.uniforms
    }

    /// CPU mirror of the vertex lift, used for bounds and tests.
    #[must_use]
    pub fn height_at(&self, index: usize) -> Option<f32> {
        let base = self.positions.get(index)?.y;
        let speed = *self.speeds.get(index)?;
        let lifted = base + (self.time() * 0.4 + 15.0) * (speed + 0.1);
        Some(lifted.rem_euclid(PARTICLE_BAND) + PARTICLE_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_seeded_and_bounded() {
        let a = ParticleField::new(64, 15.0, 7);
        let b = ParticleField::new(64, 15.0, 7);
        assert_eq!(a.positions, b.positions);
        assert!(a.positions.iter().all(|p| p.x.abs() <= 7.5 && p.z.abs() <= 7.5));
        assert!(a.positions.iter().all(|p| p.y == PARTICLE_FLOOR));
    }

    #[test]
    fn heights_stay_inside_the_band() {
        let mut field = ParticleField::new(32, 15.0, 1);
        for _ in 0..500 {
            field.advance_time(0.01);
        }
        for i in 0..field.len() {
            let h = field.height_at(i).unwrap();
            assert!((PARTICLE_FLOOR..PARTICLE_FLOOR + PARTICLE_BAND).contains(&h));
        }
    }
}
