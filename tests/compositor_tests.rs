//! Selective Bloom Compositor Tests
//!
//! Tests for:
//! - Material vault drained by the end of every frame
//! - Dark material on every non-glowing renderable during extraction
//! - Original materials back in place for the base pass
//! - Pass order and uniform upload tracking
//! - Headless backend history limits

use glam::{Vec3, Vec4};

use lumen::render::{BloomCompositor, HeadlessBackend, PassKind};
use lumen::resources::{BloomSettings, Material, ToneMappingSettings};
use lumen::scene::{BLOOM_LAYER, Camera, Light, MaterialKey, Node, NodeKey, Scene};

struct Fixture {
    scene: Scene,
    compositor: BloomCompositor,
    glow: NodeKey,
    glow_material: MaterialKey,
    /// Non-glowing renderables and the material each started with.
    plain: Vec<(NodeKey, MaterialKey)>,
}

fn fixture() -> Fixture {
    let mut scene = Scene::new();

    let group = scene.add_node(Node::group("model"));
    let mut plain = Vec::new();
    for name in ["a", "b", "c"] {
        let material = scene.add_material(Material::standard(name));
        plain.push((scene.add_to_parent(Node::mesh(name, material), group), material));
    }
    let points_material = scene.add_material(Material::standard("points"));
    plain.push((scene.add_node(Node::points("points", points_material)), points_material));

    let glow_material = scene.add_material(Material::basic("glow", Vec4::new(0.0, 0.0, 1.0, 1.0)));
    let mut glow = Node::mesh("glow", glow_material);
    glow.layers.enable(BLOOM_LAYER);
    let glow = scene.add_node(glow);

    scene.add_light("lamp", Light::new_point(Vec3::ONE, 1.0, 10.0, 2.0));

    let compositor = BloomCompositor::new(&mut scene, BloomSettings::default());
    Fixture {
        scene,
        compositor,
        glow,
        glow_material,
        plain,
    }
}

fn render(fx: &mut Fixture, backend: &mut HeadlessBackend) {
    fx.compositor.render_frame(
        &mut fx.scene,
        &Camera::default(),
        &ToneMappingSettings::default(),
        backend,
    );
}

// ============================================================================
// Mask / Restore Protocol
// ============================================================================

#[test]
fn vault_is_empty_after_every_frame() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();

    for _ in 0..100 {
        render(&mut fx, &mut backend);
        assert_eq!(fx.compositor.stashed(), 0);
    }
    assert_eq!(backend.frames_presented(), 100);
}

#[test]
fn passes_run_in_fixed_order() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();
    render(&mut fx, &mut backend);

    let kinds: Vec<_> = backend.last_frame().iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [PassKind::BloomExtraction, PassKind::Base, PassKind::Composite]);
}

#[test]
fn extraction_pass_sees_dark_material_on_plain_objects() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();
    render(&mut fx, &mut backend);

    let frame = backend.last_frame();
    let extraction = frame[0];
    let dark = fx.compositor.dark_material();
    for &(node, _) in &fx.plain {
        assert_eq!(extraction.material_of(node), Some(dark));
    }
    assert_eq!(extraction.material_of(fx.glow), Some(fx.glow_material));
}

#[test]
fn base_pass_sees_original_materials() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();
    render(&mut fx, &mut backend);

    let frame = backend.last_frame();
    let base = frame[1];
    for &(node, material) in &fx.plain {
        assert_eq!(base.material_of(node), Some(material));
        assert_eq!(fx.scene.nodes[node].material, Some(material));
    }
    assert_eq!(base.material_of(fx.glow), Some(fx.glow_material));
}

#[test]
fn material_swapped_between_frames_is_what_gets_restored() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();
    render(&mut fx, &mut backend);

    let (node, _) = fx.plain[0];
    let replacement = fx.scene.add_material(Material::standard("replacement"));
    fx.scene.nodes[node].material = Some(replacement);
    render(&mut fx, &mut backend);

    let frame = backend.last_frame();
    assert_eq!(frame[0].material_of(node), Some(fx.compositor.dark_material()));
    assert_eq!(frame[1].material_of(node), Some(replacement));
}

#[test]
fn joining_the_bloom_layer_takes_effect_next_frame() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();
    let (node, material) = fx.plain[1];

    fx.scene.nodes[node].layers.enable(BLOOM_LAYER);
    render(&mut fx, &mut backend);
    assert_eq!(backend.last_frame()[0].material_of(node), Some(material));

    fx.scene.nodes[node].layers.disable(BLOOM_LAYER);
    render(&mut fx, &mut backend);
    assert_eq!(
        backend.last_frame()[0].material_of(node),
        Some(fx.compositor.dark_material())
    );
}

#[test]
fn dark_material_is_opaque_black() {
    let fx = fixture();
    let dark = fx.scene.material(fx.compositor.dark_material()).unwrap();
    assert!(dark.is_black_opaque());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "has no material")]
fn renderable_without_material_is_fatal_in_debug() {
    let mut fx = fixture();
    fx.scene.add_node(Node::new("bare", lumen::scene::NodeKind::Mesh));
    let mut backend = HeadlessBackend::new();
    render(&mut fx, &mut backend);
}

// ============================================================================
// Uniform Tracking
// ============================================================================

#[test]
fn bloom_uniforms_upload_only_when_changed() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::new();

    for _ in 0..3 {
        render(&mut fx, &mut backend);
    }
    // First frame uploads the bloom and composite blocks once each.
    assert_eq!(backend.uploads(), 2);

    fx.compositor.bloom.set_strength(3.0);
    render(&mut fx, &mut backend);
    assert_eq!(backend.uploads(), 3);
    assert_eq!(backend.bloom_uniforms().strength, 3.0);
}

#[test]
fn bloom_parameters_are_clamped() {
    let mut bloom = BloomSettings::default();
    assert_eq!(bloom.strength(), 5.0);
    assert_eq!(bloom.threshold(), 0.0);
    assert_eq!(bloom.radius(), 0.0);

    bloom.set_radius(80.0);
    bloom.set_threshold(-1.0);
    assert_eq!(bloom.radius(), 50.0);
    assert_eq!(bloom.threshold(), 0.0);
}

// ============================================================================
// Headless History
// ============================================================================

#[test]
fn history_keeps_only_recent_frames() {
    let mut fx = fixture();
    let mut backend = HeadlessBackend::with_history(2);
    for _ in 0..5 {
        render(&mut fx, &mut backend);
    }
    assert_eq!(backend.passes().count(), 6);
    assert!(backend.passes().all(|p| p.frame >= 3));
}
