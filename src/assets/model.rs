//! Model asset boundary and surface-material assignment.
//!
//! Loaded models carry placeholder materials whose names are slot labels.
//! Only the immediate children of the root are inspected:
//!
//! | Child                         | Assignment                           |
//! |-------------------------------|--------------------------------------|
//! | mesh                          | inside                               |
//! | group, slot 0 is `"outside"`  | child 0 → outside, child 1 → inside  |
//! | group, slot 1 is `"outside"`  | child 0 → inside, child 1 → outside  |
//!
//! Anything else (no `"outside"` slot, two of them, missing children or
//! materials) is an [`StageError::AssetShape`] for that child, which then
//! keeps its loaded materials.

use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::errors::{Result, StageError};
use crate::scene::{MaterialKey, NodeKey, NodeKind, Scene};

/// Slot label marking the outer shell of a two-part child.
pub const OUTSIDE_SLOT: &str = "outside";

/// A model already added to the scene, plus its clips.
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub root: NodeKey,
    pub clips: Vec<Arc<AnimationClip>>,
}

/// The two surface materials the stage puts on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceMaterials {
    pub inside: MaterialKey,
    pub outside: MaterialKey,
}

/// Outcome of [`assign_surface_materials`], extended by
/// [`Stage::attach_model`](crate::stage::Stage::attach_model) with the clip
/// tracks it refused to bind.
#[derive(Debug, Default)]
pub struct AssignReport {
    /// Renderables that received a surface material.
    pub assigned: usize,
    /// One entry per skipped child or clip track.
    pub skipped: Vec<StageError>,
}

impl AssignReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotLayout {
    OutsideFirst,
    OutsideSecond,
}

/// Applies the slot table to the immediate children of `root`.
///
/// Fails only when `root` itself is missing; per-child problems are logged
/// and collected in the report.
pub fn assign_surface_materials(
    scene: &mut Scene,
    root: NodeKey,
    surfaces: SurfaceMaterials,
) -> Result<AssignReport> {
    let children: Vec<NodeKey> = scene
        .get_node(root)
        .ok_or_else(|| StageError::MissingTarget("model root".to_string()))?
        .children()
        .to_vec();

    let mut report = AssignReport::default();

    for child in children {
        let node = &scene.nodes[child];
        match node.kind {
            NodeKind::Mesh => {
                scene.nodes[child].material = Some(surfaces.inside);
                report.assigned += 1;
            }
            NodeKind::Group => match slot_layout(scene, child) {
                Ok((first, second, layout)) => {
                    let (a, b) = match layout {
                        SlotLayout::OutsideFirst => (surfaces.outside, surfaces.inside),
                        SlotLayout::OutsideSecond => (surfaces.inside, surfaces.outside),
                    };
                    scene.nodes[first].material = Some(a);
                    scene.nodes[second].material = Some(b);
                    report.assigned += 2;
                }
                Err(err) => {
                    log::warn!("{err}");
                    report.skipped.push(err);
                }
            },
            NodeKind::Points | NodeKind::Light => {
                let err = StageError::AssetShape {
                    node: node.name.clone(),
                    reason: format!("unexpected {:?} child of the model root", node.kind),
                };
                log::warn!("{err}");
                report.skipped.push(err);
            }
        }
    }

    Ok(report)
}

fn slot_layout(scene: &Scene, group: NodeKey) -> Result<(NodeKey, NodeKey, SlotLayout)> {
    let node = &scene.nodes[group];
    let shape = |reason: String| StageError::AssetShape {
        node: node.name.clone(),
        reason,
    };

    let &[first, second, ..] = node.children() else {
        return Err(shape(format!("expected 2 children, found {}", node.children().len())));
    };

    let is_outside = |key: NodeKey| -> Result<bool> {
        let child = &scene.nodes[key];
        child
            .material
            .filter(|_| child.kind == NodeKind::Mesh)
            .and_then(|m| scene.material(m))
            .map(|m| m.name == OUTSIDE_SLOT)
            .ok_or_else(|| shape(format!("child '{}' is not a mesh with a material", child.name)))
    };

    match (is_outside(first)?, is_outside(second)?) {
        (true, false) => Ok((first, second, SlotLayout::OutsideFirst)),
        (false, true) => Ok((first, second, SlotLayout::OutsideSecond)),
        (true, true) => Err(shape("both slots are labelled \"outside\"".to_string())),
        (false, false) => Err(shape("no slot labelled \"outside\"".to_string())),
    }
}
