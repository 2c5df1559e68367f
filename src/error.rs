//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.
//!
//! Only the persistence path can fail; in-memory cache operations are
//! infallible and model absence with `Option`. Persistence failures are
//! swallowed at the facade boundary, so these variants surface only inside
//! the crate.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or parsing the snapshot blob failed
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No usable storage directory could be determined
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
