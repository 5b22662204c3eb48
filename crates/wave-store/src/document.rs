//! Document snapshots and path addressing.
//!
//! Paths alternate collection and document segments, e.g. `tasks` is a
//! root collection, `tasks/{taskId}/bids` a nested one, and
//! `tasks/{taskId}/bids/{bidId}` a document inside it.

use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// A stored document: body fields plus its addressing metadata.
///
/// Deliveries hand consumers the complete document; mapping to a typed
/// entity (and merging `id` onto it) is the consumer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Full document path, e.g. `tasks/abc123`.
    pub path: String,
    /// Store-assigned identifier (last path segment).
    pub id: String,
    /// Path of the containing collection, e.g. `tasks/abc123/bids`.
    pub collection_path: String,
    /// Document body as stored.
    pub data: serde_json::Value,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Identifier of the document owning this document's collection, if
    /// the collection is nested: for `tasks/{taskId}/bids/{bidId}` this is
    /// `{taskId}`.
    ///
    /// Used by the cross-task bid view as a consistency check against the
    /// denormalized `task_id` field.
    #[must_use]
    pub fn parent_document_id(&self) -> Option<&str> {
        let segments: Vec<&str> = self.collection_path.split('/').collect();
        if segments.len() >= 2 {
            Some(segments[segments.len() - 2])
        } else {
            None
        }
    }
}

/// Check that a collection path is well formed: an odd number of
/// non-empty segments (collection, or collection/doc/collection, ...).
pub fn validate_collection_path(path: &str) -> Result<(), StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason: "empty path segment".to_string(),
        });
    }
    if segments.len() % 2 == 0 {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason: "even segment count addresses a document, not a collection".to_string(),
        });
    }
    Ok(())
}

/// Leaf collection name of a collection path (`tasks/{id}/bids` -> `bids`).
#[must_use]
pub fn collection_id_of(collection_path: &str) -> &str {
    collection_path
        .rsplit('/')
        .next()
        .unwrap_or(collection_path)
}

/// Full document path for an id inside a collection.
#[must_use]
pub fn doc_path(collection_path: &str, id: &str) -> String {
    format!("{collection_path}/{id}")
}
