//! The glowing-model stage.
//!
//! [`Stage`] owns every piece of state: scene, camera, tone mapping, the
//! bloom compositor, the frame loop and the timeline engine. A host drives
//! it with two calls per display refresh:
//!
//! ```rust,ignore
//! stage.update(dt);                          // timeline clock
//! stage.render(&mut backend, &mut window);   // frame loop tick
//! ```
//!
//! The choreography is built once, when the model arrives through
//! [`Stage::attach_model`].

pub mod choreography;
mod world;

use glam::{Vec3, Vec4};

use crate::animation::cursor::Cursor;
use crate::animation::mixer::AnimationMixer;
use crate::animation::timeline::{Timeline, TimelineEngine, TimelineId};
use crate::assets::{AssignReport, ModelAsset, SurfaceMaterials, assign_surface_materials};
use crate::errors::{Result, StageError};
use crate::frame_loop::{FrameContext, FrameLoop, FrameScheduler};
use crate::render::{BloomCompositor, RenderBackend};
use crate::resources::bloom::BloomSettings;
use crate::resources::material::{Material, MaterialKind, PhysicalParams};
use crate::resources::particles::ParticleField;
use crate::resources::tone_mapping::ToneMappingSettings;
use crate::scene::{BLOOM_LAYER, Camera, Light, LightKey, Node, NodeKey, Scene};
use crate::settings::StageSettings;

use world::{StageWorld, seek_mixer};

const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const RECT_LIGHT_POSITION: Vec3 = Vec3::new(-20.0, 20.0, -20.0);

/// Handles of the fixed scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProps {
    /// Transparent shell removed during the intro pulse.
    pub overlay: NodeKey,
    /// The only object on the bloom layer.
    pub glow: NodeKey,
    pub point_light: LightKey,
    pub rect_light: LightKey,
    pub particles: NodeKey,
    pub surfaces: SurfaceMaterials,
}

/// Timelines created for the attached model.
#[derive(Debug, Clone)]
pub struct AttachedModel {
    pub root: NodeKey,
    pub intro: TimelineId,
    pub reveal_camera: TimelineId,
    /// One chain per model member, in traversal order.
    pub cascade: Vec<TimelineId>,
    /// Engine time the reveal is anchored at.
    pub reveal_anchor: f64,
}

pub struct Stage {
    pub scene: Scene,
    pub camera: Camera,
    pub tone: ToneMappingSettings,
    pub particles: ParticleField,

    settings: StageSettings,
    cursor: Cursor,
    mixer: AnimationMixer,
    compositor: BloomCompositor,
    frame_loop: FrameLoop,
    timelines: TimelineEngine,
    props: StageProps,
    model: Option<AttachedModel>,
}

impl Stage {
    /// Validates `settings` and builds the scene content that does not
    /// depend on the model.
    pub fn new(settings: StageSettings) -> Result<Self> {
        settings.validate()?;

        let mut scene = Scene::new();
        let props = Self::populate(&mut scene);
        let compositor = BloomCompositor::new(&mut scene, settings.bloom_settings());

        log::debug!(
            "Stage ready: {} nodes, {} particles",
            scene.nodes.len(),
            settings.particles.count
        );

        Ok(Self {
            camera: settings.camera(),
            tone: settings.tone_mapping_settings(),
            particles: settings.particle_field(),
            frame_loop: FrameLoop::new(settings.frame_steps()),
            scene,
            settings,
            cursor: Cursor::default(),
            mixer: AnimationMixer::new(),
            compositor,
            timelines: TimelineEngine::new(),
            props,
            model: None,
        })
    }

    fn populate(scene: &mut Scene) -> StageProps {
        let inside = scene.add_material(
            Material::physical(
                "inside",
                BLUE.extend(1.0),
                PhysicalParams {
                    roughness: 0.5,
                    metalness: 0.5,
                    transmission: 0.3,
                    clearcoat: 1.0,
                    clearcoat_roughness: 0.0,
                },
            )
            .with_transparent(true),
        );
        let outside = scene.add_material(Material::standard("outside surface"));

        let overlay_material = scene.add_material(Material::standard("overlay").with_transparent(true));
        let overlay = scene.add_node(Node::mesh("overlay", overlay_material));

        let glow_material = scene.add_material(Material::basic("glow", BLUE.extend(1.0)).with_transparent(true));
        let mut glow = Node::mesh("glow", glow_material);
        glow.layers.enable(BLOOM_LAYER);
        let glow = scene.add_node(glow);

        let (_, point_light) = scene.add_light("point light", Light::new_point(BLUE, 2.0, 10.0, 2.0));
        let (rect_node, rect_light) =
            scene.add_light("rect light", Light::new_rect_area(Vec3::ONE, 10.0, 15.0, 15.0, Vec3::ZERO));
        if let Some(node) = scene.get_node_mut(rect_node) {
            node.transform.position = RECT_LIGHT_POSITION;
        }

        let points_material = scene.add_material(
            Material::new("particles", MaterialKind::Points, Vec4::ONE).with_transparent(true),
        );
        let particles = scene.add_node(Node::points("particles", points_material));

        StageProps {
            overlay,
            glow,
            point_light,
            rect_light,
            particles,
            surfaces: SurfaceMaterials { inside, outside },
        }
    }

    /// Takes over a model the loader has added to the scene.
    ///
    /// Assigns surface materials, plays every clip under cursor control and
    /// schedules the intro now and the reveal at the intro's end. Per-child
    /// material problems and malformed clip tracks are reported, not
    /// returned as errors; such tracks stay unbound.
    pub fn attach_model(&mut self, asset: ModelAsset) -> Result<AssignReport> {
        if self.model.is_some() {
            return Err(StageError::InvariantViolation("a model is already attached".to_string()));
        }
        if !self.scene.contains(asset.root) {
            return Err(StageError::MissingTarget("model root is not in the scene".to_string()));
        }

        let mut report = assign_surface_materials(&mut self.scene, asset.root, self.props.surfaces)?;

        for clip in asset.clips {
            for err in clip.tracks.iter().filter_map(|track| track.validate().err()) {
                log::warn!("Clip '{}': {err}", clip.name);
                report.skipped.push(err);
            }
            self.mixer.play_clip(clip, &self.scene, asset.root);
        }
        seek_mixer(self.cursor, &mut self.mixer, &mut self.scene);

        let config = &self.settings.choreography;
        let intro = self.timelines.schedule(choreography::intro(config, asset.root, self.props.overlay)?);
        let reveal_anchor = self.timelines.absolute_end(intro).unwrap_or(self.timelines.clock());

        let reveal_camera = self
            .timelines
            .schedule_at(choreography::reveal_camera(config)?, reveal_anchor);

        let members = self.scene.traverse(asset.root);
        let cascade = choreography::reveal_cascade(config, &members)?
            .into_iter()
            .map(|chain| self.timelines.schedule_at(chain, reveal_anchor))
            .collect();

        log::info!(
            "Model attached: {} members, {} clips, reveal at {reveal_anchor:.3}s",
            members.len(),
            self.mixer.actions().len()
        );

        self.model = Some(AttachedModel {
            root: asset.root,
            intro,
            reveal_camera,
            cascade,
            reveal_anchor,
        });
        Ok(report)
    }

    /// Advances the choreography clock by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let mut world = StageWorld {
            scene: &mut self.scene,
            camera: &mut self.camera,
            tone: &mut self.tone,
            cursor: &mut self.cursor,
            mixer: &mut self.mixer,
            frame_loop: &mut self.frame_loop,
        };
        self.timelines.advance(dt, &mut world);
    }

    /// Runs one frame loop tick.
    pub fn render(&mut self, backend: &mut dyn RenderBackend, scheduler: &mut dyn FrameScheduler) {
        let ctx = FrameContext {
            scene: &mut self.scene,
            camera: &self.camera,
            tone: &self.tone,
            particles: &mut self.particles,
            compositor: &mut self.compositor,
        };
        self.frame_loop.tick(ctx, backend, scheduler);
    }

    /// Runs an extra timeline next to the choreography, anchored at the
    /// current clock. Lights and material colors are only animated this way.
    pub fn schedule(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.schedule(timeline)
    }

    /// Moves the cursor and poses the model to match.
    pub fn seek(&mut self, value: f32) {
        self.cursor.set(value);
        seek_mixer(self.cursor, &mut self.mixer, &mut self.scene);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &StageSettings {
        &self.settings
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn compositor(&self) -> &BloomCompositor {
        &self.compositor
    }

    #[must_use]
    pub fn bloom(&self) -> &BloomSettings {
        &self.compositor.bloom
    }

    pub fn bloom_mut(&mut self) -> &mut BloomSettings {
        &mut self.compositor.bloom
    }

    #[must_use]
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    #[must_use]
    pub fn timelines(&self) -> &TimelineEngine {
        &self.timelines
    }

    #[must_use]
    pub fn props(&self) -> &StageProps {
        &self.props
    }

    #[must_use]
    pub fn model(&self) -> Option<&AttachedModel> {
        self.model.as_ref()
    }
}
