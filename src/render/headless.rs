//! A backend that draws nothing and records everything.
//!
//! Each pass snapshots which material every renderable carried at the moment
//! the pass ran. Uniform uploads follow the same version check a GPU backend
//! does: a block is "uploaded" only when its version moved.

use std::collections::VecDeque;

use crate::render::backend::{PassKind, RenderBackend, TargetId};
use crate::resources::bloom::{BloomSettings, BloomUniforms, CompositeUniforms};
use crate::resources::uniforms::UniformBlock;
use crate::scene::{Camera, MaterialKey, NodeKey, Scene};

/// Default number of frames kept in the pass history.
pub const DEFAULT_HISTORY_FRAMES: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    /// Index of the frame the pass belongs to (counted from 0).
    pub frame: u64,
    pub kind: PassKind,
    /// `(node, material)` for every renderable, in scene traversal order.
    /// Empty for [`PassKind::Composite`].
    pub materials: Vec<(NodeKey, Option<MaterialKey>)>,
}

impl PassRecord {
    /// Material bound to `node` while this pass ran.
    #[must_use]
    pub fn material_of(&self, node: NodeKey) -> Option<MaterialKey> {
        self.materials
            .iter()
            .find(|(k, _)| *k == node)
            .and_then(|(_, m)| *m)
    }
}

#[derive(Debug)]
pub struct HeadlessBackend {
    frame: u64,
    next_target: u32,
    history_frames: usize,
    passes: VecDeque<PassRecord>,

    bloom_version: Option<u64>,
    composite_version: Option<u64>,
    uploads: u64,
    bloom_uniforms: BloomUniforms,
    composite_uniforms: CompositeUniforms,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY_FRAMES)
    }

    /// Keeps the passes of the last `frames` frames; older ones are dropped.
    #[must_use]
    pub fn with_history(frames: usize) -> Self {
        Self {
            frame: 0,
            next_target: 0,
            history_frames: frames.max(1),
            passes: VecDeque::new(),
            bloom_version: None,
            composite_version: None,
            uploads: 0,
            bloom_uniforms: BloomUniforms::default(),
            composite_uniforms: CompositeUniforms::default(),
        }
    }

    /// Frames presented so far (one per composite).
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frame
    }

    /// Number of uniform block uploads performed.
    #[must_use]
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    #[must_use]
    pub fn passes(&self) -> impl Iterator<Item = &PassRecord> {
        self.passes.iter()
    }

    /// Passes of the most recent frame that has at least one pass recorded.
    #[must_use]
    pub fn last_frame(&self) -> Vec<&PassRecord> {
        let Some(last) = self.passes.back().map(|p| p.frame) else {
            return Vec::new();
        };
        self.passes.iter().filter(|p| p.frame == last).collect()
    }

    /// Uniforms most recently uploaded for the extraction chain.
    #[must_use]
    pub fn bloom_uniforms(&self) -> &BloomUniforms {
        &self.bloom_uniforms
    }

    /// Uniforms most recently uploaded for the composite pass.
    #[must_use]
    pub fn composite_uniforms(&self) -> &CompositeUniforms {
        &self.composite_uniforms
    }

    fn issue_target(&mut self) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target = self.next_target.wrapping_add(1);
        id
    }

    fn record(&mut self, kind: PassKind, scene: Option<&Scene>) {
        let materials = scene.map_or_else(Vec::new, |scene| {
            scene
                .renderables()
                .into_iter()
                .map(|k| (k, scene.nodes[k].material))
                .collect()
        });
        self.passes.push_back(PassRecord {
            frame: self.frame,
            kind,
            materials,
        });

        let oldest_kept = self.frame.saturating_sub(self.history_frames as u64 - 1);
        while self.passes.front().is_some_and(|p| p.frame < oldest_kept) {
            self.passes.pop_front();
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn render_extraction(&mut self, scene: &Scene, _camera: &Camera, bloom: &BloomSettings) -> TargetId {
        let block = bloom.uniforms();
        if self.bloom_version != Some(block.version()) {
            self.bloom_version = Some(block.version());
            self.bloom_uniforms = *block.read();
            self.uploads += 1;
        }
        self.record(PassKind::BloomExtraction, Some(scene));
        self.issue_target()
    }

    fn render_base(&mut self, scene: &Scene, _camera: &Camera) -> TargetId {
        self.record(PassKind::Base, Some(scene));
        self.issue_target()
    }

    fn composite(&mut self, base: TargetId, bloom: TargetId, uniforms: &UniformBlock<CompositeUniforms>) {
        if self.composite_version != Some(uniforms.version()) {
            self.composite_version = Some(uniforms.version());
            self.composite_uniforms = *uniforms.read();
            self.uploads += 1;
        }
        log::trace!("composite {base:?} + {bloom:?} (frame {})", self.frame);
        self.record(PassKind::Composite, None);
        self.frame += 1;
        // Offscreen targets are transient; ids restart every frame.
        self.next_target = 0;
    }
}
