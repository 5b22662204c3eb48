//! Store error types for wave-store.

use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Update or delete targeted a document that does not exist.
    #[error("Document not found: {path}")]
    NotFound { path: String },

    /// A collection or document path is malformed.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Document body could not be serialized or deserialized.
    #[error("Document body error: {0}")]
    Body(#[from] serde_json::Error),

    /// A write was handed something other than a JSON object.
    #[error("Invalid document body: {0}")]
    InvalidBody(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
