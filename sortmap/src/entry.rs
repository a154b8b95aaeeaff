//! Entries and their independently sized key/value storage.

use alloc::vec::Vec;

use growbuf::{BufferError, GrowthPolicy, Source};

/// One growable allocation holding a key or a value.
///
/// `bytes` keeps one byte past the logical size for a zero terminator, so a
/// block that can hold `n` bytes has `bytes.len() == n + 1`. An unallocated
/// block is empty.
#[derive(Debug, Default)]
struct Block {
    bytes: Vec<u8>,
    len: usize,
}

impl Block {
    fn capacity(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }

    fn with_nul(&self) -> &[u8] {
        self.bytes.get(..=self.len).unwrap_or(&[0][..])
    }

    /// Grows to exactly `size` plus the terminator. Existing bytes are kept
    /// and new ones are zero.
    fn fit(&mut self, size: usize) -> Result<(), BufferError> {
        let required = size
            .checked_add(1)
            .ok_or(BufferError::OutOfMemory { requested: size })?;
        GrowthPolicy::from_rate(0.0).grow_vec(&mut self.bytes, required)
    }

    /// Fills the first `len` bytes from `source` and terminates them.
    /// `Source::Skip` only changes the logical size and leaves every byte,
    /// the terminator slot included, as it was. The block has been fitted
    /// to `len`.
    fn assign(&mut self, source: Source<'_>, len: usize) {
        if source != Source::Skip {
            source.apply(&mut self.bytes[..len]);
            self.bytes[len] = 0;
        }
        self.len = len;
    }

    fn release(&mut self) {
        self.bytes = Vec::new();
        self.len = 0;
    }
}

/// A key/value pair stored in a [`SortedMap`](crate::SortedMap).
///
/// Both sides are followed by a zero byte in storage, exposed through
/// [`key_with_nul`](Entry::key_with_nul) and
/// [`value_with_nul`](Entry::value_with_nul) for text-compatible access.
/// A value resized with `Source::Skip` keeps whatever byte already sits
/// past its new end.
#[derive(Debug, Default)]
pub struct Entry {
    key: Block,
    value: Block,
}

impl Entry {
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.key.as_slice()
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        self.value.as_slice()
    }

    #[must_use]
    pub fn key_with_nul(&self) -> &[u8] {
        self.key.with_nul()
    }

    #[must_use]
    pub fn value_with_nul(&self) -> &[u8] {
        self.value.with_nul()
    }

    /// Bytes the key storage can hold without reallocating.
    #[must_use]
    pub fn key_capacity(&self) -> usize {
        self.key.capacity()
    }

    /// Bytes the value storage can hold without reallocating.
    #[must_use]
    pub fn value_capacity(&self) -> usize {
        self.value.capacity()
    }

    pub(crate) fn value_mut(&mut self) -> &mut [u8] {
        self.value.as_mut_slice()
    }

    /// Makes room for a key of `key_len` bytes and a value of `value_len`
    /// bytes. Nothing visible changes.
    pub(crate) fn fit(&mut self, key_len: usize, value_len: usize) -> Result<(), BufferError> {
        self.key.fit(key_len)?;
        self.value.fit(value_len)
    }

    pub(crate) fn fit_value(&mut self, len: usize) -> Result<(), BufferError> {
        self.value.fit(len)
    }

    pub(crate) fn assign_key(&mut self, key: &[u8]) {
        self.key.assign(Source::Copy(key), key.len());
    }

    pub(crate) fn assign_value(&mut self, source: Source<'_>, len: usize) {
        self.value.assign(source, len);
    }

    /// Frees both allocations.
    pub(crate) fn release(&mut self) {
        self.key.release();
        self.value.release();
    }

    pub(crate) fn is_allocated(&self) -> bool {
        !self.key.bytes.is_empty() || !self.value.bytes.is_empty()
    }
}
