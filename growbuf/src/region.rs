use alloc::vec::Vec;

use crate::error::BufferError;
use crate::growth::GrowthPolicy;

/// Contiguous memory behind a buffer: either owned and growable by a policy,
/// or borrowed from the caller and never reallocated nor freed.
///
/// Owned bytes are always initialized; `bytes.len()` is the capacity.
#[derive(Debug)]
pub enum Region<'a> {
    Owned { bytes: Vec<u8>, policy: GrowthPolicy },
    Borrowed(&'a mut [u8]),
}

impl<'a> Region<'a> {
    /// Allocates an owned region of exactly `capacity` zeroed bytes.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the allocation fails.
    pub fn allocate(capacity: usize, policy: GrowthPolicy) -> Result<Self, BufferError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| BufferError::OutOfMemory { requested: capacity })?;
        bytes.resize(capacity, 0);
        Ok(Region::Owned { bytes, policy })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        match self {
            Region::Owned { bytes, .. } => bytes.len(),
            Region::Borrowed(buf) => buf.len(),
        }
    }

    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Region::Borrowed(_))
    }

    #[must_use]
    pub fn policy(&self) -> GrowthPolicy {
        match self {
            Region::Owned { policy, .. } => *policy,
            Region::Borrowed(_) => GrowthPolicy::Fixed,
        }
    }

    /// Replaces the growth policy of an owned region. Borrowed regions keep
    /// their fixed size and report `false`.
    pub fn set_policy(&mut self, new_policy: GrowthPolicy) -> bool {
        match self {
            Region::Owned { policy, .. } => {
                *policy = new_policy;
                true
            }
            Region::Borrowed(_) => false,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Region::Owned { bytes, .. } => bytes.as_slice(),
            Region::Borrowed(buf) => &buf[..],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Region::Owned { bytes, .. } => bytes.as_mut_slice(),
            Region::Borrowed(buf) => &mut buf[..],
        }
    }

    /// Grows the region to hold at least `min_capacity` bytes.
    ///
    /// Offsets into the region stay valid across growth, so callers keep
    /// their cursors as they are.
    ///
    /// # Errors
    ///
    /// - `BufferError::GrowthDisabled` for borrowed or fixed regions that are too small
    /// - `BufferError::OutOfMemory` if reallocation fails
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        match self {
            Region::Owned { bytes, policy } => policy.grow_vec(bytes, min_capacity),
            Region::Borrowed(buf) => {
                if buf.len() >= min_capacity {
                    Ok(())
                } else {
                    log::debug!(
                        "borrowed region cannot grow: {} bytes required, {} available",
                        min_capacity,
                        buf.len()
                    );
                    Err(BufferError::GrowthDisabled {
                        required: min_capacity,
                        capacity: buf.len(),
                    })
                }
            }
        }
    }

    /// Drops owned storage, leaving an empty owned region with the same
    /// policy. Borrowed regions are left untouched.
    pub fn release(&mut self) {
        if let Region::Owned { bytes, .. } = self {
            log::debug!("releasing owned region of {} bytes", bytes.len());
            *bytes = Vec::new();
        }
    }
}
