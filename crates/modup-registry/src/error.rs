//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while decoding or reading a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A hash literal could not be decoded under any supported notation,
    /// or its magnitude does not fit in 32 bits.
    #[error("malformed hash literal: {literal:?}")]
    MalformedLiteral { literal: String },

    /// I/O error while reading or writing registry text.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for registry results.
pub type Result<T> = std::result::Result<T, RegistryError>;
