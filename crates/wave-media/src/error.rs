//! Media storage error types.

use thiserror::Error;

/// Errors from blob uploads.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Content type is not an image.
    #[error("Not an image upload: {content_type}")]
    InvalidFile { content_type: String },

    /// Upload exceeds the size ceiling.
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },

    /// Media storage has no root or base URL configured.
    #[error("Media storage is not configured (set media.root and media.public_base_url)")]
    NotConfigured,

    /// Underlying object store error.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
