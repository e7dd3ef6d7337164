//! Error types for merge operations.

use thiserror::Error;

/// Errors that can occur while merging registries on disk.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The existing or incoming registry text could not be decoded.
    #[error("registry error: {0}")]
    Registry(#[from] modup_registry::RegistryError),

    /// I/O error reading, appending to, or rewriting the destination.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for merge results.
pub type Result<T> = std::result::Result<T, MergeError>;
