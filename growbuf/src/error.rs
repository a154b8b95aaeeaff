use thiserror::Error;

/// Error types for buffer operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BufferError {
    /// The allocator could not provide the requested storage
    #[error("Out of memory: failed to allocate {requested} elements")]
    OutOfMemory {
        /// Number of elements the failed allocation asked for
        requested: usize,
    },
    /// More capacity is needed but the region is borrowed or fixed-size
    #[error("Growth disabled: {required} bytes required, but capacity is fixed at {capacity}")]
    GrowthDisabled {
        /// Capacity the operation needed
        required: usize,
        /// Capacity of the region
        capacity: usize,
    },
    /// An offset or index argument is beyond its allowed bound
    #[error("Offset out of range: offset {offset} exceeds limit {limit}")]
    OutOfRange {
        /// Offset that was requested
        offset: usize,
        /// Bound the offset was checked against
        limit: usize,
    },
    /// Rejected before any state was touched
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of why the argument was rejected
        reason: &'static str,
    },
}
