use rustc_hash::FxHashMap;

use crate::scene::{MaterialKey, NodeKey};

/// Transient stash of original materials while the bloom mask is applied.
///
/// Filled and fully drained inside a single
/// [`BloomCompositor::render_frame`](super::BloomCompositor::render_frame);
/// it is empty at every frame boundary.
#[derive(Debug, Default)]
pub struct MaterialVault {
    entries: FxHashMap<NodeKey, MaterialKey>,
}

impl MaterialVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the original material of `node`.
    ///
    /// Returns the material already stashed for `node`, which means the
    /// node was masked twice without a restore in between.
    pub fn stash(&mut self, node: NodeKey, material: MaterialKey) -> Option<MaterialKey> {
        self.entries.insert(node, material)
    }

    /// Removes every entry.
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeKey, MaterialKey)> + '_ {
        self.entries.drain()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
