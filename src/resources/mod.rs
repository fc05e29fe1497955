//! Resource Definitions
//!
//! Pure data consumed by the render backend:
//! - [`Material`]: surface descriptions, including the dark bloom mask
//! - [`BloomSettings`]: extraction threshold / strength / radius
//! - [`ToneMappingSettings`]: operator and exposure
//! - [`ParticleField`]: the rising point cloud and its time uniform
//! - [`UniformBlock`]: versioned POD uniform storage

pub mod bloom;
pub mod material;
pub mod particles;
pub mod tone_mapping;
pub mod uniforms;

pub use bloom::{BloomSettings, BloomUniforms, CompositeUniforms};
pub use material::{Material, MaterialKind, PhysicalParams};
pub use particles::ParticleField;
pub use tone_mapping::{ToneMappingMode, ToneMappingSettings};
pub use uniforms::UniformBlock;
