use smallvec::SmallVec;

use crate::scene::layers::Layers;
use crate::scene::transform::Transform;
use crate::scene::{LightKey, MaterialKey, NodeKey};

/// What a node draws, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure grouping node, never rendered.
    Group,
    /// Triangle mesh surface.
    Mesh,
    /// Point sprites (particle field).
    Points,
    /// Light holder; the light itself lives in `Scene::lights`.
    Light,
}

impl NodeKind {
    /// Mesh and point nodes are the ones that carry a surface material.
    #[inline]
    #[must_use]
    pub fn is_renderable(self) -> bool {
        matches!(self, Self::Mesh | Self::Points)
    }
}

/// A scene node.
///
/// # Hierarchy
///
/// - `parent`: handle to the parent node (None for root nodes)
/// - `children`: child handles, in insertion order
/// - `order`: scene-wide insertion index, the stable traversal key
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
    /// Render-layer membership
    pub layers: Layers,
    /// Surface material; required for [`NodeKind::is_renderable`] nodes.
    pub material: Option<MaterialKey>,
    pub light: Option<LightKey>,

    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: SmallVec<[NodeKey; 4]>,
    pub(crate) order: u64,
}

impl Node {
    #[must_use]
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            transform: Transform::new(),
            visible: true,
            layers: Layers::default(),
            material: None,
            light: None,
            parent: None,
            children: SmallVec::new(),
            order: 0,
        }
    }

    #[must_use]
    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[must_use]
    pub fn mesh(name: &str, material: MaterialKey) -> Self {
        let mut node = Self::new(name, NodeKind::Mesh);
        node.material = Some(material);
        node
    }

    #[must_use]
    pub fn points(name: &str, material: MaterialKey) -> Self {
        let mut node = Self::new(name, NodeKind::Points);
        node.material = Some(material);
        node
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns child handles in insertion order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Scene-wide insertion index.
    #[inline]
    #[must_use]
    pub fn order(&self) -> u64 {
        self.order
    }
}
