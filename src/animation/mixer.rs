use std::sync::Arc;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::clip::{AnimationClip, TargetPath};
use crate::scene::{NodeKey, Scene};

/// Plays clip actions against one model subtree.
///
/// The stage never lets the mixer run on wall-clock time: the cursor seeks it
/// with [`AnimationMixer::set_time`] every tick the cursor moves.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    time: f32,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `clip` to `root`, starts it and returns its action index.
    pub fn play_clip(&mut self, clip: Arc<AnimationClip>, scene: &Scene, root: NodeKey) -> usize {
        let mut action = AnimationAction::new(clip);
        action.bindings = Binder::bind(scene, root, action.clip());
        self.add_action(action)
    }

    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    /// Global mixer time (seconds).
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Longest clip duration among the actions.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.actions.iter().map(|a| a.clip().duration).fold(0.0, f32::max)
    }

    /// Jumps every action to `time` and poses the scene.
    ///
    /// Finished actions are rewound first so that seeking backwards works.
    pub fn set_time(&mut self, time: f32, scene: &mut Scene) {
        self.time = 0.0;
        for action in &mut self.actions {
            action.rewind();
        }
        self.update(time, scene);
    }

    /// Advances all actions by `dt` and writes sampled values to bound nodes.
    fn update(&mut self, dt: f32, scene: &mut Scene) {
        self.time += dt;
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(binding.node) else {
                    continue;
                };

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetPath::Translation) => node.transform.position = v,
                    (TrackValue::Vector3(v), TargetPath::Scale) => node.transform.scale = v,
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => node.transform.set_rotation_quat(q),
                    _ => log::warn!("Track {} value does not match its target path", binding.track_index),
                }
            }
        }
    }
}
