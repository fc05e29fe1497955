//! Render-layer membership.
//!
//! Every node carries a [`Layers`] mask. A node belongs to layer `n` when bit
//! `n` is set; two masks "test" positive when they share at least one bit.
//! Nodes start on layer 0 only.

use bitflags::bitflags;

/// Layer channel reserved for objects that glow.
pub const BLOOM_LAYER: u8 = 1;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Layers: u32 {
        const DEFAULT = 1 << 0;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layers {
    /// Mask with only `channel` set.
    #[inline]
    #[must_use]
    pub fn only(channel: u8) -> Self {
        debug_assert!(channel < 32, "layer channel out of range: {channel}");
        Self::from_bits_retain(1 << u32::from(channel))
    }

    /// Adds membership of `channel`.
    #[inline]
    pub fn enable(&mut self, channel: u8) {
        *self |= Self::only(channel);
    }

    /// Removes membership of `channel`.
    #[inline]
    pub fn disable(&mut self, channel: u8) {
        *self = Self::from_bits_retain(self.bits() & !Self::only(channel).bits());
    }

    /// Returns `true` when the two masks share at least one channel.
    #[inline]
    #[must_use]
    pub fn test(self, other: Layers) -> bool {
        self.intersects(other)
    }
}
