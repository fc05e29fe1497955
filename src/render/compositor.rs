//! Selective bloom
//!
//! The same scene is drawn twice per frame. For the extraction pass every
//! renderable outside the bloom layer wears the shared dark material, so only
//! glowing objects survive the threshold and blur. The originals are put back
//! before the base pass, and the two targets are summed:
//!
//! ```text
//! mask ─► extraction ─► restore ─► base ─► composite (base + bloom)
//! ```

use crate::render::backend::RenderBackend;
use crate::render::vault::MaterialVault;
use crate::resources::bloom::{BloomSettings, CompositeUniforms};
use crate::resources::material::Material;
use crate::resources::tone_mapping::ToneMappingSettings;
use crate::resources::uniforms::UniformBlock;
use crate::scene::{BLOOM_LAYER, Camera, Layers, MaterialKey, Scene};

/// Weight of the bloom texture in the final sum.
pub const BLOOM_WEIGHT: f32 = 1.0;

pub struct BloomCompositor {
    pub bloom: BloomSettings,
    vault: MaterialVault,
    dark_material: MaterialKey,
    bloom_layer: Layers,
    composite: UniformBlock<CompositeUniforms>,
}

impl BloomCompositor {
    /// Registers the dark material in `scene` and returns a compositor using it.
    pub fn new(scene: &mut Scene, bloom: BloomSettings) -> Self {
        let dark_material = scene.add_material(Material::dark());
        Self {
            bloom,
            vault: MaterialVault::new(),
            dark_material,
            bloom_layer: Layers::only(BLOOM_LAYER),
            composite: UniformBlock::new(CompositeUniforms {
                bloom_weight: BLOOM_WEIGHT,
                exposure: 1.0,
                tone_mapping_mode: 0,
                __pad: 0,
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn dark_material(&self) -> MaterialKey {
        self.dark_material
    }

    /// Number of materials currently stashed. Zero outside `render_frame`.
    #[inline]
    #[must_use]
    pub fn stashed(&self) -> usize {
        self.vault.len()
    }

    #[must_use]
    pub fn composite_uniforms(&self) -> &UniformBlock<CompositeUniforms> {
        &self.composite
    }

    /// Renders one composited frame.
    ///
    /// The scene must not gain or lose nodes while this runs; it is borrowed
    /// mutably for the whole call, which rules that out.
    pub fn render_frame(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        tone: &ToneMappingSettings,
        backend: &mut dyn RenderBackend,
    ) {
        debug_assert!(
            self.vault.is_empty(),
            "material vault holds {} entries at frame start",
            self.vault.len()
        );
        if !self.vault.is_empty() {
            log::error!(
                "Material vault not empty at frame start ({} entries), restoring and clearing",
                self.vault.len()
            );
            self.restore(scene);
        }

        self.sync_composite(tone);

        self.mask(scene);
        let bloom_target = backend.render_extraction(scene, camera, &self.bloom);
        self.restore(scene);
        debug_assert!(self.vault.is_empty());

        let base_target = backend.render_base(scene, camera);
        backend.composite(base_target, bloom_target, &self.composite);
    }

    fn mask(&mut self, scene: &mut Scene) {
        for key in scene.renderables() {
            let node = &mut scene.nodes[key];
            if node.layers.test(self.bloom_layer) {
                continue;
            }
            debug_assert!(node.material.is_some(), "renderable '{}' has no material", node.name);
            let Some(original) = node.material else {
                log::error!("Renderable '{}' has no material, left unmasked", node.name);
                continue;
            };
            if self.vault.stash(key, original).is_some() {
                log::error!("Renderable '{}' masked twice in one frame", node.name);
            }
            node.material = Some(self.dark_material);
        }
    }

    fn restore(&mut self, scene: &mut Scene) {
        for (key, original) in self.vault.drain() {
            // A node removed mid-frame simply loses its entry.
            if let Some(node) = scene.nodes.get_mut(key) {
                node.material = Some(original);
            }
        }
    }

    /// Writes the composite block only when something changed, so its
    /// version tracks real edits.
    fn sync_composite(&mut self, tone: &ToneMappingSettings) {
        let mode = tone.mode.shader_id();
        let current = self.composite.read();
        if current.exposure != tone.exposure || current.tone_mapping_mode != mode {
            let mut block = self.composite.write();
            block.exposure = tone.exposure;
            block.tone_mapping_mode = mode;
        }
    }
}
