//! The boundary between the compositor and whatever owns the GPU.
//!
//! A backend renders the scene as it finds it: the compositor has already
//! swapped materials before [`RenderBackend::render_extraction`] and restored them
//! before [`RenderBackend::render_base`].

use crate::resources::bloom::{BloomSettings, CompositeUniforms};
use crate::resources::uniforms::UniformBlock;
use crate::scene::{Camera, Scene};

/// Offscreen render target handle issued by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Masked scene → threshold → blur.
    BloomExtraction,
    /// Scene with its real materials.
    Base,
    /// Full-screen `base + bloom` onto the display.
    Composite,
}

pub trait RenderBackend {
    /// Renders the (masked) scene through the bloom chain offscreen.
    fn render_extraction(&mut self, scene: &Scene, camera: &Camera, bloom: &BloomSettings) -> TargetId;

    /// Renders the scene normally into an offscreen base target.
    fn render_base(&mut self, scene: &Scene, camera: &Camera) -> TargetId;

    /// Sums `base` and `bloom` onto the display target.
    fn composite(&mut self, base: TargetId, bloom: TargetId, uniforms: &UniformBlock<CompositeUniforms>);
}
