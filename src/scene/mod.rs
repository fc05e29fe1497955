//! Scene Graph
//!
//! The minimal scene graph the stage reads and writes:
//! - [`Node`]: hierarchy entry with transform, layers and an optional material
//! - [`Transform`]: position, Euler rotation and scale
//! - [`Scene`]: node/material/light storage plus the scene-level transform
//! - [`Camera`]: the single perspective camera
//! - [`Light`]: point and rect-area lights
//! - [`Layers`]: render-layer membership mask
//!
//! Traversal order is explicit: children are visited by the order in which
//! they were inserted into the scene, never by storage order.

pub mod camera;
pub mod layers;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use layers::{BLOOM_LAYER, Layers};
pub use light::{Light, LightKind};
pub use node::{Node, NodeKind};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MaterialKey;
    pub struct LightKey;
}
