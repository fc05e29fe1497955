//! Versioned uniform blocks.
//!
//! Settings own their GPU-facing data as [`UniformBlock<T>`]. Every mutable
//! access bumps the block version when the guard drops, so a backend only
//! re-uploads a block whose version moved since its last upload.

use bytemuck::Pod;

/// A plain-old-data uniform value plus its change version.
#[derive(Debug, Clone)]
pub struct UniformBlock<T: Pod> {
    data: T,
    version: u64,
}

impl<T: Pod> UniformBlock<T> {
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { data, version: 0 }
    }

    #[inline]
    #[must_use]
    pub fn read(&self) -> &T {
        &self.data
    }

    /// Mutable access; the version is bumped when the guard is dropped.
    pub fn write(&mut self) -> BlockGuard<'_, T> {
        BlockGuard {
            data: &mut self.data,
            version: &mut self.version,
        }
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Raw bytes as laid out for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.data)
    }
}

/// Mutable guard returned by [`UniformBlock::write`].
pub struct BlockGuard<'a, T> {
    data: &'a mut T,
    version: &'a mut u64,
}

impl<T> std::ops::Deref for BlockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<T> std::ops::DerefMut for BlockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<T> Drop for BlockGuard<'_, T> {
    fn drop(&mut self) {
        *self.version = self.version.wrapping_add(1);
    }
}
