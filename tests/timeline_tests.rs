//! Timeline Engine Tests
//!
//! Tests for:
//! - Start-time resolution of position tokens (determinism, named anchors)
//! - Segment state machine and hook ordering
//! - Missing / vanishing targets
//! - Cancellation
//! - Staggered cascades and additive per-tick spin

use glam::Vec3;

use lumen::animation::{
    Axes, Cursor, Easing, NodeProperty, Position, Segment, SegmentState, SideEffect, TimelineBuilder,
    TimelineEngine, TweenTarget, TweenValue, TweenWorld,
};
use lumen::scene::{Node, NodeKey, Scene};
use lumen::settings::ChoreographyConfig;
use lumen::stage::choreography::reveal_cascade;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Minimal world: a scene for node targets plus a few scalars, logging
/// every side effect it is asked to apply.
#[derive(Default)]
struct TestWorld {
    scene: Scene,
    exposure: f32,
    cursor: Cursor,
    camera: Vec3,
    effects: Vec<SideEffect>,
}

impl TestWorld {
    fn milestones(&self) -> Vec<&'static str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                SideEffect::Milestone(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    fn count(&self, name: &str) -> usize {
        self.milestones().iter().filter(|m| **m == name).count()
    }
}

impl TweenWorld for TestWorld {
    fn read(&self, target: TweenTarget) -> Option<TweenValue> {
        match target {
            TweenTarget::Node(key, NodeProperty::Position) => {
                self.scene.get_node(key).map(|n| n.transform.position.into())
            }
            TweenTarget::Node(key, NodeProperty::Scale) => self.scene.get_node(key).map(|n| n.transform.scale.into()),
            TweenTarget::Node(key, NodeProperty::Rotation) => {
                self.scene.get_node(key).map(|n| n.transform.rotation.into())
            }
            TweenTarget::Exposure => Some(self.exposure.into()),
            TweenTarget::Cursor => Some(self.cursor.value().into()),
            TweenTarget::CameraPosition => Some(self.camera.into()),
            _ => None,
        }
    }

    fn write(&mut self, target: TweenTarget, value: TweenValue) -> bool {
        match (target, value) {
            (TweenTarget::Node(key, property), TweenValue::Vector3(v)) => {
                let Some(node) = self.scene.get_node_mut(key) else {
                    return false;
                };
                match property {
                    NodeProperty::Position => node.transform.position = v,
                    NodeProperty::Rotation => node.transform.rotation = v,
                    NodeProperty::Scale => node.transform.scale = v,
                }
                true
            }
            (TweenTarget::Exposure, TweenValue::Scalar(v)) => {
                self.exposure = v;
                true
            }
            (TweenTarget::Cursor, TweenValue::Scalar(v)) => {
                self.cursor.set(v);
                true
            }
            (TweenTarget::CameraPosition, TweenValue::Vector3(v)) => {
                self.camera = v;
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, effect: &SideEffect) {
        match *effect {
            SideEffect::Spin { node, delta } => {
                if let Some(node) = self.scene.get_node_mut(node) {
                    node.transform.rotation += delta;
                }
            }
            SideEffect::RemoveNode(key) => self.scene.remove_node(key),
            _ => {}
        }
        self.effects.push(*effect);
    }
}

fn hooked(target: TweenTarget, to: impl Into<TweenValue>, duration: f64) -> Segment {
    Segment::new(target, to, duration)
        .on_start(SideEffect::Milestone("start"))
        .on_update(SideEffect::Milestone("update"))
        .on_complete(SideEffect::Milestone("complete"))
}

// ============================================================================
// Start Resolution
// ============================================================================

#[test]
fn chained_then_named_anchor_scenario() {
    let timeline = TimelineBuilder::new("scenario")
        .push(Segment::new(TweenTarget::Exposure, 1.0, 0.2).at(Position::Absolute(0.0)))
        .push(Segment::new(TweenTarget::Exposure, 2.0, 0.2).at(Position::AfterPreviousEnd(0.0)))
        .push(Segment::new(TweenTarget::Exposure, 3.0, 5.0).at(Position::AfterStartOf { index: 0, offset: 1.0 }))
        .build()
        .unwrap();

    assert_eq!(timeline.local_starts(), vec![0.0, 0.2, 1.0]);
}

#[test]
fn start_resolution_is_reproducible() {
    let build = || {
        TimelineBuilder::new("repeat")
            .delay(0.3)
            .push(Segment::new(TweenTarget::Exposure, 1.0, 0.7))
            .push(Segment::new(TweenTarget::Exposure, 1.0, 0.1).at(Position::AfterPreviousStart(0.013)))
            .push(Segment::new(TweenTarget::Exposure, 1.0, 2.9).at(Position::AfterPreviousEnd(1.0 / 3.0)))
            .push(Segment::new(TweenTarget::Exposure, 1.0, 0.5).at(Position::Absolute(0.05)))
            .build()
            .unwrap()
    };

    let a: Vec<u64> = build().local_starts().into_iter().map(f64::to_bits).collect();
    let b: Vec<u64> = build().local_starts().into_iter().map(f64::to_bits).collect();
    assert_eq!(a, b);
}

#[test]
fn mismatched_value_kind_is_rejected() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::group("n"));
    let result = TimelineBuilder::new("bad")
        .push(Segment::new(TweenTarget::Node(node, NodeProperty::Scale), 1.0, 1.0))
        .build();
    assert!(result.is_err());
}

#[test]
fn delay_holds_every_segment_back() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("late")
            .delay(2.0)
            .push(hooked(TweenTarget::Exposure, 1.0, 1.0))
            .build()
            .unwrap(),
    );

    engine.advance(1.9, &mut world);
    assert!(world.effects.is_empty());
    assert_eq!(engine.timeline(id).unwrap().state(0), Some(SegmentState::Pending));

    engine.advance(0.2, &mut world);
    assert_eq!(world.milestones().first(), Some(&"start"));
    assert_eq!(engine.absolute_start(id), Some(2.0));
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn start_precedes_updates_and_complete_fires_once() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    engine.schedule(
        TimelineBuilder::new("hooks")
            .push(hooked(TweenTarget::Exposure, 4.0, 0.2))
            .build()
            .unwrap(),
    );

    for _ in 0..60 {
        engine.advance(1.0 / 60.0, &mut world);
    }

    let log = world.milestones();
    assert_eq!(log.first(), Some(&"start"));
    assert_eq!(log.get(1), Some(&"update"));
    assert_eq!(world.count("start"), 1);
    assert_eq!(world.count("complete"), 1);
    assert_eq!(log.last(), Some(&"complete"));
    assert!(approx(world.exposure, 4.0));
}

#[test]
fn complete_waits_for_full_progress() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("wait")
            .push(hooked(TweenTarget::Exposure, 10.0, 1.0).ease(Easing::Linear))
            .build()
            .unwrap(),
    );

    engine.advance(0.5, &mut world);
    engine.advance(0.49, &mut world);
    assert_eq!(world.count("complete"), 0);
    assert!(approx(world.exposure, 9.9));
    assert_eq!(engine.timeline(id).unwrap().state(0), Some(SegmentState::Active));

    engine.advance(0.02, &mut world);
    assert_eq!(world.count("complete"), 1);
    assert_eq!(world.exposure, 10.0);
}

#[test]
fn overshooting_tick_clamps_and_fires_everything_once() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    engine.schedule(
        TimelineBuilder::new("jump")
            .push(hooked(TweenTarget::Exposure, 3.0, 0.5).ease(Easing::ExpoIn))
            .build()
            .unwrap(),
    );

    engine.advance(5.0, &mut world);
    assert_eq!(world.milestones(), ["start", "update", "complete"]);
    assert_eq!(world.exposure, 3.0);

    engine.advance(1.0, &mut world);
    assert_eq!(world.milestones().len(), 3);
}

#[test]
fn timeline_complete_fires_after_last_segment() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("done")
            .push(Segment::new(TweenTarget::Exposure, 1.0, 0.5))
            .push(Segment::new(TweenTarget::Exposure, 2.0, 0.5))
            .on_complete(SideEffect::Milestone("all done"))
            .build()
            .unwrap(),
    );

    engine.advance(0.75, &mut world);
    assert_eq!(world.count("all done"), 0);
    engine.advance(0.5, &mut world);
    assert_eq!(world.count("all done"), 1);
    assert!(engine.timeline(id).unwrap().is_finished());
    assert!(engine.is_idle());
}

#[test]
fn axis_mask_leaves_other_components() {
    let mut world = TestWorld {
        camera: Vec3::new(7.0, 1.5, 1.5),
        ..Default::default()
    };
    let mut engine = TimelineEngine::new();
    engine.schedule(
        TimelineBuilder::new("lift")
            .push(Segment::new(TweenTarget::CameraPosition, Vec3::new(0.0, 5.0, 6.0), 1.0).axes(Axes::Y | Axes::Z))
            .build()
            .unwrap(),
    );

    engine.advance(2.0, &mut world);
    assert_eq!(world.camera, Vec3::new(7.0, 5.0, 6.0));
}

// ============================================================================
// Missing Targets & Cancellation
// ============================================================================

#[test]
fn destroyed_target_is_skipped_silently() {
    let mut world = TestWorld::default();
    let node = world.scene.add_node(Node::group("doomed"));
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("skip")
            .push(Segment::new(TweenTarget::Exposure, 1.0, 0.5).on_start(SideEffect::RemoveNode(node)))
            .push(hooked(TweenTarget::Node(node, NodeProperty::Scale), Vec3::splat(2.0), 0.5))
            .on_complete(SideEffect::Milestone("finished"))
            .build()
            .unwrap(),
    );

    for _ in 0..20 {
        engine.advance(0.1, &mut world);
    }

    let timeline = engine.timeline(id).unwrap();
    assert_eq!(timeline.state(0), Some(SegmentState::Completed));
    assert_eq!(timeline.state(1), Some(SegmentState::Skipped));
    assert_eq!(world.count("start"), 0);
    assert_eq!(world.count("finished"), 1);
}

#[test]
fn target_vanishing_mid_segment_stops_it() {
    let mut world = TestWorld::default();
    let node = world.scene.add_node(Node::group("short-lived"));
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("vanish")
            .push(hooked(TweenTarget::Node(node, NodeProperty::Position), Vec3::ONE, 1.0))
            .build()
            .unwrap(),
    );

    engine.advance(0.3, &mut world);
    world.scene.remove_node(node);
    engine.advance(0.3, &mut world);
    engine.advance(1.0, &mut world);

    assert_eq!(engine.timeline(id).unwrap().state(0), Some(SegmentState::Skipped));
    assert_eq!(world.count("complete"), 0);
}

#[test]
fn cancel_keeps_fired_effects_and_stops_the_rest() {
    let mut world = TestWorld::default();
    let mut engine = TimelineEngine::new();
    let id = engine.schedule(
        TimelineBuilder::new("cancel")
            .push(hooked(TweenTarget::Exposure, 1.0, 1.0))
            .push(hooked(TweenTarget::Exposure, 2.0, 1.0))
            .build()
            .unwrap(),
    );

    engine.advance(0.5, &mut world);
    assert!(engine.cancel(id));
    let exposure = world.exposure;
    engine.advance(5.0, &mut world);

    assert_eq!(world.count("start"), 1);
    assert_eq!(world.count("complete"), 0);
    assert_eq!(world.exposure, exposure);
    assert!(engine.timeline(id).unwrap().is_empty());
}

// ============================================================================
// Cascades
// ============================================================================

#[test]
fn thousand_member_cascade_staggers_every_start() {
    let mut scene = Scene::new();
    let members: Vec<NodeKey> = (0..1000).map(|i| scene.add_node(Node::group(&format!("m{i}")))).collect();
    let chains = reveal_cascade(&ChoreographyConfig::default(), &members).unwrap();

    let mut engine = TimelineEngine::new();
    let anchor = 12.5;
    let ids: Vec<_> = chains.into_iter().map(|c| engine.schedule_at(c, anchor)).collect();

    let starts: Vec<f64> = ids.iter().map(|&id| engine.absolute_start(id).unwrap()).collect();
    assert!((starts[999] - anchor - 4.995).abs() < 1e-9);
    assert!(starts.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn spin_accumulates_one_delta_per_active_tick() {
    let mut world = TestWorld::default();
    let node = world.scene.add_node(Node::group("spinner"));
    let delta = Vec3::splat(0.01);
    let mut engine = TimelineEngine::new();
    engine.schedule(
        TimelineBuilder::new("spin")
            .push(
                Segment::new(TweenTarget::Node(node, NodeProperty::Position), Vec3::ZERO, 10.0)
                    .on_update(SideEffect::Spin { node, delta }),
            )
            .build()
            .unwrap(),
    );

    // Uneven tick lengths, all inside the segment.
    let ticks = 50;
    for i in 0..ticks {
        engine.advance(if i % 2 == 0 { 0.01 } else { 0.07 }, &mut world);
    }

    let rotation = world.scene.nodes[node].transform.rotation;
    assert!(approx(rotation.x, ticks as f32 * 0.01), "got {rotation:?}");
    assert!(approx(rotation.y, rotation.x));
    assert!(approx(rotation.z, rotation.x));
}
