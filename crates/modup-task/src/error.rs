//! Error types for update tasks.

use thiserror::Error;

/// Errors that can occur while preparing or running an update task.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A payload file named by the step list could not be opened.
    #[error("payload file {path:?}: {source}")]
    Payload {
        path: String,
        source: std::io::Error,
    },

    /// The update manifest could not be decoded.
    #[error("manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    /// Shipped registry data could not be decoded.
    #[error("registry error: {0}")]
    Registry(#[from] modup_registry::RegistryError),

    /// A registry merge step failed.
    #[error("merge error: {0}")]
    Merge(#[from] modup_merge::MergeError),

    /// I/O error while copying files or reading the manifest.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for task results.
pub type TaskResult<T> = Result<T, TaskError>;
