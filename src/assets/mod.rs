pub mod model;
pub mod prefab;

pub use model::{AssignReport, ModelAsset, OUTSIDE_SLOT, SurfaceMaterials, assign_surface_materials};
pub use prefab::{Prefab, PrefabNode};
