//! Per-refresh driver.
//!
//! One [`FrameLoop::tick`] runs per display refresh, in a fixed order:
//!
//! 1. spin the whole scene about Y,
//! 2. add the faster spin once the camera has been released,
//! 3. advance the particle clock,
//! 4. composite the frame,
//! 5. ask the host for the next refresh.
//!
//! Every step advances by a fixed amount per tick, independent of elapsed
//! time; a skipped tick only delays the picture.

use crate::render::{BloomCompositor, RenderBackend};
use crate::resources::particles::ParticleField;
use crate::resources::tone_mapping::ToneMappingSettings;
use crate::scene::{Camera, Scene};

/// Scene spin per tick (radians).
pub const SCENE_SPIN: f32 = 0.002;
/// Extra spin per tick after the camera is released (radians).
pub const RELEASED_SPIN: f32 = 0.006;
/// Particle clock step per tick.
pub const PARTICLE_TIME_STEP: f32 = 0.01;

/// Host hook for scheduling the next refresh.
///
/// A windowed host forwards this to its redraw request.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only counts requests; for headless runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingScheduler {
    pub requested: u64,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

/// Per-tick increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSteps {
    pub spin: f32,
    pub released_spin: f32,
    pub particle_time: f32,
}

impl Default for FrameSteps {
    fn default() -> Self {
        Self {
            spin: SCENE_SPIN,
            released_spin: RELEASED_SPIN,
            particle_time: PARTICLE_TIME_STEP,
        }
    }
}

/// State a tick reads and writes, borrowed from its owner for one call.
pub struct FrameContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a Camera,
    pub tone: &'a ToneMappingSettings,
    pub particles: &'a mut ParticleField,
    pub compositor: &'a mut BloomCompositor,
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    steps: FrameSteps,
    camera_released: bool,
    ticks: u64,
}

impl FrameLoop {
    #[must_use]
    pub fn new(steps: FrameSteps) -> Self {
        Self {
            steps,
            camera_released: false,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn steps(&self) -> FrameSteps {
        self.steps
    }

    /// Sets the camera-release latch. There is no way to clear it.
    pub fn release_camera(&mut self) {
        if !self.camera_released {
            log::info!("Camera released after {} ticks", self.ticks);
        }
        self.camera_released = true;
    }

    #[inline]
    #[must_use]
    pub fn is_camera_released(&self) -> bool {
        self.camera_released
    }

    /// Ticks run so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(
        &mut self,
        ctx: FrameContext<'_>,
        backend: &mut dyn RenderBackend,
        scheduler: &mut dyn FrameScheduler,
    ) {
        ctx.scene.transform.rotate_y(self.steps.spin);
        if self.camera_released {
            ctx.scene.transform.rotate_y(self.steps.released_spin);
        }

        ctx.particles.advance_time(self.steps.particle_time);

        ctx.compositor.render_frame(ctx.scene, ctx.camera, ctx.tone, backend);

        self.ticks += 1;
        scheduler.request_frame();
    }
}
