use crate::animation::clip::{AnimationClip, TargetPath};
use crate::scene::{NodeKey, Scene};

/// Maps track `track_index` of a clip to a property of `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeKey,
    pub target: TargetPath,
}

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` against nodes under `root` by name.
    ///
    /// Tracks naming a node that does not exist, or whose keyframes fail
    /// [`Track::validate`](crate::animation::clip::Track::validate), are
    /// left unbound.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeKey, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            if let Err(err) = track.validate() {
                log::debug!("Clip '{}': track {track_index} unbound, {err}", clip.name);
                continue;
            }
            match scene.find_by_name(root, &track.meta.node_name) {
                Some(node) => bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                }),
                None => log::debug!(
                    "Clip '{}': no node named '{}', track {} unbound",
                    clip.name,
                    track.meta.node_name,
                    track_index
                ),
            }
        }

        bindings
    }
}
