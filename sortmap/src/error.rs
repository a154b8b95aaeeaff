use growbuf::BufferError;
use thiserror::Error;

/// Error types for sorted map operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SortedMapError {
    /// Growing the entry array or an entry's key/value storage failed
    #[error(transparent)]
    Storage(#[from] BufferError),
    /// The key cannot be stored
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Description of why the key was rejected
        reason: &'static str,
    },
}
