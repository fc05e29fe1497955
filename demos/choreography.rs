//! Headless Choreography Run
//!
//! Builds a small two-part model, attaches it to a stage and runs the whole
//! choreography at 60 Hz against the recording backend, logging the
//! milestones on the way.
//!
//! Usage:
//! - `RUST_LOG=debug cargo run --example choreography`
//! - `cargo run --example choreography -- settings.json`

use std::sync::Arc;

use glam::{Quat, Vec3};
use lumen::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use lumen::assets::OUTSIDE_SLOT;
use lumen::scene::{NodeKind, Transform};
use lumen::{CountingScheduler, HeadlessBackend, Prefab, PrefabNode, Stage, StageSettings};

const FRAME: f64 = 1.0 / 60.0;

fn demo_model() -> Prefab {
    let spin = Track {
        meta: TrackMeta {
            node_name: "core".to_string(),
            target: TargetPath::Rotation,
        },
        data: TrackData::Quaternion(KeyframeTrack::new(
            vec![0.0, 10.416_667],
            vec![Quat::IDENTITY, Quat::from_rotation_y(std::f32::consts::PI)],
            InterpolationMode::Linear,
        )),
    };

    let offset = |x: f32| Transform {
        position: Vec3::new(x, 0.0, 0.0),
        ..Transform::new()
    };

    Prefab {
        nodes: vec![
            PrefabNode::new("model", NodeKind::Group).with_children(&[1, 2]),
            PrefabNode::new("core", NodeKind::Mesh).with_slot("inner"),
            PrefabNode::new("shell", NodeKind::Group)
                .with_children(&[3, 4])
                .with_transform(offset(0.5)),
            PrefabNode::new("shell outer", NodeKind::Mesh).with_slot(OUTSIDE_SLOT),
            PrefabNode::new("shell inner", NodeKind::Mesh).with_slot("inner"),
        ],
        root: 0,
        animations: vec![Arc::new(AnimationClip::new("spin", vec![spin]))],
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => StageSettings::from_path(path)?,
        None => StageSettings::default(),
    };

    let mut stage = Stage::new(settings)?;
    let model = demo_model().instantiate(&mut stage.scene)?;
    let report = stage.attach_model(model)?;
    log::info!("Surface materials: {} assigned, {} skipped", report.assigned, report.skipped.len());

    let mut backend = HeadlessBackend::new();
    let mut scheduler = CountingScheduler::default();

    while !stage.timelines().is_idle() {
        stage.update(FRAME);
        stage.render(&mut backend, &mut scheduler);
    }

    log::info!(
        "Done after {} frames ({:.2}s): cursor {:.3}, exposure {:.2}, camera {:?}, uploads {}",
        backend.frames_presented(),
        stage.timelines().clock(),
        stage.cursor().value(),
        stage.tone.exposure,
        stage.camera.position,
        backend.uploads()
    );
    Ok(())
}
