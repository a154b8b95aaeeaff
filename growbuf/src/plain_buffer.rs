use alloc::vec::Vec;

use crate::error::BufferError;
use crate::growth::GrowthPolicy;
use crate::DEFAULT_INITIAL_CAPACITY;

/// A flat owned region with no cursors: `capacity()` bytes, all addressable.
///
/// Grows to exactly the size asked for. Serves as the copy target when the
/// content of another container is cloned into plain memory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlainBuffer {
    bytes: Vec<u8>,
}

impl PlainBuffer {
    /// Allocates `min_capacity` zeroed bytes.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the allocation fails.
    pub fn with_capacity(min_capacity: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::default();
        buffer.ensure_capacity(min_capacity)?;
        Ok(buffer)
    }

    /// Allocates the default capacity (200 bytes).
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the allocation fails.
    pub fn with_default_capacity() -> Result<Self, BufferError> {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Allocates exactly `bytes.len()` bytes holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the allocation fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::with_capacity(bytes.len())?;
        buffer.bytes.copy_from_slice(bytes);
        Ok(buffer)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Reallocates to exactly `min_capacity` bytes when smaller. New bytes
    /// are zeroed.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if reallocation fails.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        GrowthPolicy::from_rate(0.0).grow_vec(&mut self.bytes, min_capacity)
    }

    /// Copies this buffer into a new allocation of the same capacity.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        Self::from_bytes(&self.bytes)
    }

    /// Frees the storage. The buffer can be grown again afterwards.
    pub fn release(&mut self) {
        self.bytes = Vec::new();
    }
}
