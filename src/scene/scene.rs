use glam::Affine3A;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::resources::material::Material;
use crate::scene::light::Light;
use crate::scene::node::{Node, NodeKind};
use crate::scene::transform::Transform;
use crate::scene::{LightKey, MaterialKey, NodeKey};

/// Scene graph storage.
///
/// Owns nodes, materials and lights. The scene itself has a transform so the
/// whole stage can be spun as one object.
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,

    pub materials: SlotMap<MaterialKey, Material>,
    pub lights: SlotMap<LightKey, Light>,

    /// Scene-level transform applied on top of every root node.
    pub transform: Transform,

    next_order: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            materials: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            transform: Transform::new(),
            next_order: 0,
        }
    }

    fn insert(&mut self, mut node: Node) -> NodeKey {
        node.order = self.next_order;
        self.next_order += 1;
        self.nodes.insert(node)
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Adds a node as the last child of `parent`.
    ///
    /// Falls back to the root level when `parent` does not exist.
    pub fn add_to_parent(&mut self, mut node: Node, parent: NodeKey) -> NodeKey {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent of '{}' not found, adding at root", node.name);
            return self.add_node(node);
        }
        node.parent = Some(parent);
        let key = self.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        key
    }

    /// Moves `child` under `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Attach with a missing node, ignored");
            return;
        }

        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, key: NodeKey) {
        let parent = self.nodes.get(key).and_then(Node::parent);
        if let Some(p) = parent {
            if let Some(node) = self.nodes.get_mut(p)
                && let Some(i) = node.children.iter().position(|&x| x == key)
            {
                node.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == key) {
            self.root_nodes.remove(i);
        }
    }

    /// Removes a node and its whole subtree. Lights owned by removed nodes
    /// are dropped as well; materials are shared and stay.
    pub fn remove_node(&mut self, key: NodeKey) {
        if !self.nodes.contains_key(key) {
            return;
        }
        self.detach(key);

        for k in self.traverse(key) {
            if let Some(node) = self.nodes.remove(k)
                && let Some(light) = node.light
            {
                self.lights.remove(light);
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Depth-first, pre-order walk of the subtree rooted at `root`.
    ///
    /// Siblings are visited by insertion order (`Node::order`), so the result
    /// only depends on how the scene was built.
    #[must_use]
    pub fn traverse(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(root) {
            return out;
        }

        let mut stack: SmallVec<[NodeKey; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            out.push(key);

            let mut children: SmallVec<[NodeKey; 8]> = node.children.iter().copied().collect();
            children.sort_by_key(|&c| self.nodes.get(c).map_or(u64::MAX, Node::order));
            // Reverse so the first child is popped first.
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Walks every root subtree in root insertion order.
    #[must_use]
    pub fn traverse_all(&self) -> Vec<NodeKey> {
        let mut roots = self.root_nodes.clone();
        roots.sort_by_key(|&r| self.nodes.get(r).map_or(u64::MAX, Node::order));
        roots.into_iter().flat_map(|r| self.traverse(r)).collect()
    }

    /// All mesh and point nodes in traversal order.
    #[must_use]
    pub fn renderables(&self) -> Vec<NodeKey> {
        self.traverse_all()
            .into_iter()
            .filter(|&k| self.nodes[k].kind.is_renderable())
            .collect()
    }

    /// Finds the first node named `name` under `root` (inclusive).
    #[must_use]
    pub fn find_by_name(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        self.traverse(root)
            .into_iter()
            .find(|&k| self.nodes[k].name == name)
    }

    /// World matrix of `key`, including the scene-level transform.
    #[must_use]
    pub fn world_matrix(&self, key: NodeKey) -> Option<Affine3A> {
        let mut matrix = self.nodes.get(key)?.transform.local_matrix();
        let mut current = self.nodes.get(key)?.parent;
        while let Some(p) = current {
            let parent = self.nodes.get(p)?;
            matrix = parent.transform.local_matrix() * matrix;
            current = parent.parent;
        }
        Some(self.transform.local_matrix() * matrix)
    }

    // ========================================================================
    // Materials & Lights
    // ========================================================================

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    /// Adds a light holder node at the root level.
    pub fn add_light(&mut self, name: &str, light: Light) -> (NodeKey, LightKey) {
        let light_key = self.lights.insert(light);
        let mut node = Node::new(name, NodeKind::Light);
        node.light = Some(light_key);
        (self.add_node(node), light_key)
    }

    #[must_use]
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }
}
