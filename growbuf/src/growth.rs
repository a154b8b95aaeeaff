//! Capacity growth rule shared by every container in the crate family.

use alloc::vec::Vec;

use crate::error::BufferError;

/// How a container enlarges its storage when a request does not fit.
///
/// `Scale(factor)` multiplies the required size by `factor` so that later
/// requests are absorbed without reallocating. A factor of `1.0` grows to
/// exactly the required size. `Fixed` never grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthPolicy {
    /// Storage never grows; requests beyond capacity fail.
    Fixed,
    /// Storage grows to `required * factor`, with `factor >= 1.0`.
    Scale(f32),
}

impl GrowthPolicy {
    /// Builds a policy from a growth rate, the extra fraction added on each
    /// expansion. The stored factor is `rate + 1`; negative and non-finite
    /// rates count as 0.
    #[must_use]
    pub fn from_rate(rate: f32) -> Self {
        let rate = if !rate.is_finite() || rate < 0.0 { 0.0 } else { rate };
        GrowthPolicy::Scale(rate + 1.0)
    }

    /// Growth rate this policy was built from, `None` for `Fixed`.
    #[must_use]
    pub fn rate(&self) -> Option<f32> {
        match self {
            GrowthPolicy::Fixed => None,
            GrowthPolicy::Scale(factor) => Some(factor - 1.0),
        }
    }

    /// Whether storage under this policy may be enlarged.
    #[must_use]
    pub fn allows_growth(&self) -> bool {
        matches!(self, GrowthPolicy::Scale(factor) if *factor >= 1.0)
    }

    /// Size to allocate when at least `required` elements are needed.
    ///
    /// Never returns less than `required`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn target(&self, required: usize) -> usize {
        match self {
            GrowthPolicy::Fixed => required,
            GrowthPolicy::Scale(factor) => {
                let scaled = (required as f64 * f64::from(*factor)) as usize;
                scaled.max(required)
            }
        }
    }

    /// Ensures `items` holds at least `min_len` elements, growing it by this
    /// policy and filling new slots with `T::default()`.
    ///
    /// This is the `ensure capacity` contract any container adopts: the
    /// element size comes from `T`, the growth rate from the policy.
    ///
    /// # Errors
    ///
    /// - `BufferError::GrowthDisabled` if growth is needed and the policy is `Fixed`
    /// - `BufferError::OutOfMemory` if the allocator refuses the new size
    pub fn grow_vec<T: Default>(&self, items: &mut Vec<T>, min_len: usize) -> Result<(), BufferError> {
        if items.len() >= min_len {
            return Ok(());
        }
        if !self.allows_growth() {
            log::debug!(
                "growth refused: {} elements required, fixed at {}",
                min_len,
                items.len()
            );
            return Err(BufferError::GrowthDisabled {
                required: min_len,
                capacity: items.len(),
            });
        }

        let target = self.target(min_len);
        items
            .try_reserve_exact(target - items.len())
            .map_err(|_| BufferError::OutOfMemory { requested: target })?;
        log::trace!("growing storage: {} -> {} elements", items.len(), target);
        items.resize_with(target, T::default);
        Ok(())
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::from_rate(crate::DEFAULT_GROWTH_RATE)
    }
}
