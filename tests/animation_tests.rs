//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack sampling (linear, step, clamping, cursor hint)
//! - AnimationClip duration
//! - Binder name resolution
//! - AnimationMixer seeking (forward, past the end, backwards)
//! - Cursor-driven playback time
//! - Easing endpoints

use std::sync::Arc;

use glam::{Quat, Vec3};
use lumen::animation::{
    AnimationClip, AnimationMixer, Binder, CURSOR_MAX, Cursor, Easing, InterpolationMode, KeyframeCursor,
    KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use lumen::scene::{Node, NodeKey, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn slide_track(node: &str, end_time: f32) -> Track {
    Track {
        meta: TrackMeta {
            node_name: node.to_string(),
            target: TargetPath::Translation,
        },
        data: TrackData::Vector3(KeyframeTrack::new(
            vec![0.0, end_time],
            vec![Vec3::ZERO, Vec3::new(end_time, 0.0, 0.0)],
            InterpolationMode::Linear,
        )),
    }
}

fn rig() -> (Scene, NodeKey, NodeKey) {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::group("rig"));
    let arm = scene.add_to_parent(Node::group("arm"), root);
    (scene, root, arm)
}

// ============================================================================
// KeyframeTrack Sampling
// ============================================================================

#[test]
fn linear_track_interpolates() {
    let track = KeyframeTrack::new(vec![0.0, 1.0, 3.0], vec![0.0_f32, 10.0, 30.0], InterpolationMode::Linear);
    assert!(approx(track.sample(0.5).unwrap(), 5.0));
    assert!(approx(track.sample(2.0).unwrap(), 20.0));
}

#[test]
fn step_track_holds_previous_key() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![1.0_f32, 2.0], InterpolationMode::Step);
    assert_eq!(track.sample(0.99), Some(1.0));
    assert_eq!(track.sample(1.0), Some(2.0));
}

#[test]
fn sampling_outside_the_range_clamps() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![4.0_f32, 8.0], InterpolationMode::Linear);
    assert_eq!(track.sample(-5.0), Some(4.0));
    assert_eq!(track.sample(50.0), Some(8.0));
}

#[test]
fn empty_track_samples_nothing() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(Vec::new(), Vec::new(), InterpolationMode::Linear);
    assert_eq!(track.sample(0.0), None);
    assert_eq!(track.end_time(), 0.0);
}

#[test]
fn malformed_track_samples_nothing() {
    let track = KeyframeTrack::new(vec![0.0, 1.0, 2.0], vec![1.0_f32, 2.0], InterpolationMode::Linear);
    assert!(!track.is_well_formed());
    assert_eq!(track.sample(1.5), None);
    assert_eq!(track.sample_with_cursor(1.5, &mut KeyframeCursor::default()), None);
}

#[test]
fn cursor_hint_matches_binary_search() {
    let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
    let values: Vec<f32> = (0..20).map(|i| (i * i) as f32).collect();
    let track = KeyframeTrack::new(times, values, InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    // Forward in small steps, one big jump back, then forward again.
    let probes = [0.1, 0.3, 0.8, 1.6, 2.2, 9.4, 0.2, 4.7, 4.8, 9.9];
    for t in probes {
        let hinted = track.sample_with_cursor(t, &mut cursor).unwrap();
        let plain = track.sample(t).unwrap();
        assert!(approx(hinted, plain), "t = {t}: {hinted} vs {plain}");
    }
}

// ============================================================================
// Clip & Binder
// ============================================================================

#[test]
fn clip_duration_is_latest_keyframe() {
    let clip = AnimationClip::new("walk", vec![slide_track("a", 1.5), slide_track("b", 4.0)]);
    assert!(approx(clip.duration, 4.0));
}

#[test]
fn binder_leaves_unknown_names_unbound() {
    let (scene, root, arm) = rig();
    let clip = AnimationClip::new("walk", vec![slide_track("ghost", 1.0), slide_track("arm", 1.0)]);

    let bindings = Binder::bind(&scene, root, &clip);
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].track_index, 1);
    assert_eq!(bindings[0].node, arm);
}

// ============================================================================
// Mixer Seeking
// ============================================================================

#[test]
fn set_time_poses_bound_node() {
    let (mut scene, root, arm) = rig();
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(AnimationClip::new("slide", vec![slide_track("arm", 2.0)])), &scene, root);

    mixer.set_time(1.0, &mut scene);
    assert!(approx(scene.nodes[arm].transform.position.x, 1.0));
    assert!(approx(mixer.time(), 1.0));
}

#[test]
fn seeking_past_the_end_holds_last_pose() {
    let (mut scene, root, arm) = rig();
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(AnimationClip::new("slide", vec![slide_track("arm", 2.0)])), &scene, root);

    mixer.set_time(5.0, &mut scene);
    assert!(approx(scene.nodes[arm].transform.position.x, 2.0));
    assert!(mixer.actions()[0].finished);
    assert!(approx(mixer.actions()[0].time, 2.0));
}

#[test]
fn seeking_backwards_after_finishing() {
    let (mut scene, root, arm) = rig();
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(AnimationClip::new("slide", vec![slide_track("arm", 2.0)])), &scene, root);

    mixer.set_time(5.0, &mut scene);
    mixer.set_time(0.5, &mut scene);
    assert!(approx(scene.nodes[arm].transform.position.x, 0.5));
    assert!(!mixer.actions()[0].finished);
}

#[test]
fn rotation_track_poses_rotation() {
    let (mut scene, root, arm) = rig();
    let turn = Quat::from_rotation_y(1.0);
    let clip = AnimationClip::new(
        "turn",
        vec![Track {
            meta: TrackMeta {
                node_name: "arm".to_string(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Quat::IDENTITY, turn],
                InterpolationMode::Linear,
            )),
        }],
    );
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(clip), &scene, root);

    mixer.set_time(1.0, &mut scene);
    let pose = scene.nodes[arm].transform.rotation_quat();
    assert!(pose.angle_between(turn) < 1e-3);
}

#[test]
fn mixer_duration_is_longest_clip() {
    let (scene, root, _) = rig();
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(AnimationClip::new("a", vec![slide_track("arm", 2.0)])), &scene, root);
    mixer.play_clip(Arc::new(AnimationClip::new("b", vec![slide_track("arm", 3.5)])), &scene, root);
    assert!(approx(mixer.duration(), 3.5));
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn cursor_drives_playback_time() {
    let (mut scene, root, arm) = rig();
    let mut mixer = AnimationMixer::new();
    mixer.play_clip(Arc::new(AnimationClip::new("slide", vec![slide_track("arm", 4.0)])), &scene, root);

    let cursor = Cursor::new(0.25);
    mixer.set_time(cursor.playback_time(mixer.duration()), &mut scene);
    assert!(approx(scene.nodes[arm].transform.position.x, 1.0));
}

#[test]
fn cursor_never_reaches_one() {
    let mut cursor = Cursor::default();
    cursor.set(1.0);
    assert_eq!(cursor.value(), CURSOR_MAX);
    assert!(cursor.playback_time(10.0) < 10.0);
}

// ============================================================================
// Easing
// ============================================================================

#[test]
fn easing_endpoints() {
    for easing in [Easing::Linear, Easing::QuadOut, Easing::ExpoOut, Easing::ExpoIn, Easing::ExpoInOut] {
        assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at 0");
        assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at 1");
    }
}

#[test]
fn expo_out_front_loads_progress() {
    assert!(Easing::ExpoOut.apply(0.3) > 0.85);
    assert!(Easing::Linear.apply(0.3) < Easing::ExpoOut.apply(0.3));
}
