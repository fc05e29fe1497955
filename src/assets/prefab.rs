use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::assets::model::ModelAsset;
use crate::errors::{Result, StageError};
use crate::resources::material::Material;
use crate::scene::transform::Transform;
use crate::scene::{MaterialKey, Node, NodeKind, Scene};

/// Loader-side node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Name of the material slot the file assigned, if any.
    pub material_slot: Option<String>,
    /// Indices into `Prefab::nodes`, in declaration order.
    pub children_indices: Vec<usize>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            transform: Transform::new(),
            material_slot: None,
            children_indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_slot(mut self, slot: &str) -> Self {
        self.material_slot = Some(slot.to_string());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: &[usize]) -> Self {
        self.children_indices = children.to_vec();
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Parsed model file, independent of any scene.
///
/// An external loader produces this; [`Prefab::instantiate`] turns it into
/// scene nodes plus a [`ModelAsset`].
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    pub nodes: Vec<PrefabNode>,
    /// Index of the single root node.
    pub root: usize,
    pub animations: Vec<Arc<AnimationClip>>,
}

impl Prefab {
    /// Adds every node reachable from `root` to `scene`.
    ///
    /// Each distinct slot name becomes one placeholder material named after
    /// the slot. Index errors and cycles are reported as asset shape errors
    /// and nothing is added in that case.
    pub fn instantiate(&self, scene: &mut Scene) -> Result<ModelAsset> {
        let order = self.walk_order()?;

        let mut slots: FxHashMap<&str, MaterialKey> = FxHashMap::default();
        let mut keys = vec![None; self.nodes.len()];

        for (index, parent) in order {
            let prefab = &self.nodes[index];
            let mut node = Node::new(&prefab.name, prefab.kind);
            node.transform = prefab.transform;
            if let Some(slot) = prefab.material_slot.as_deref() {
                let material = *slots
                    .entry(slot)
                    .or_insert_with(|| scene.add_material(Material::standard(slot)));
                node.material = Some(material);
            }

            let key = match parent.and_then(|p| keys[p]) {
                Some(parent_key) => scene.add_to_parent(node, parent_key),
                None => scene.add_node(node),
            };
            keys[index] = Some(key);
        }

        let root = keys[self.root].ok_or_else(|| StageError::AssetShape {
            node: String::from("<root>"),
            reason: "root was not instantiated".to_string(),
        })?;

        Ok(ModelAsset {
            root,
            clips: self.animations.clone(),
        })
    }

    /// Pre-order `(index, parent_index)` list, checked before touching the scene.
    fn walk_order(&self) -> Result<Vec<(usize, Option<usize>)>> {
        let shape = |node: &str, reason: String| StageError::AssetShape {
            node: node.to_string(),
            reason,
        };

        if self.root >= self.nodes.len() {
            return Err(shape("<root>", format!("root index {} out of range", self.root)));
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, None)];

        while let Some((index, parent)) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                return Err(shape(&self.nodes[index].name, "node reached twice".to_string()));
            }
            order.push((index, parent));

            let node = &self.nodes[index];
            for &child in node.children_indices.iter().rev() {
                if child >= self.nodes.len() {
                    return Err(shape(&node.name, format!("child index {child} out of range")));
                }
                stack.push((child, Some(index)));
            }
        }
        Ok(order)
    }
}
