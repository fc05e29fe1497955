//! Frame composition.
//!
//! [`BloomCompositor`] owns the per-frame mask/restore protocol; a
//! [`RenderBackend`] does the actual drawing.

pub mod backend;
pub mod compositor;
pub mod headless;
pub mod vault;

pub use backend::{PassKind, RenderBackend, TargetId};
pub use compositor::{BLOOM_WEIGHT, BloomCompositor};
pub use headless::{HeadlessBackend, PassRecord};
pub use vault::MaterialVault;
