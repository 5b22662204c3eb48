//! # wave-store
//!
//! Embedded document store with live-query subscriptions.
//!
//! Documents live in a single libSQL table addressed by path
//! (`tasks/{taskId}`, `tasks/{taskId}/bids/{bidId}`), and every
//! registered query is re-evaluated after each write, pushing a
//! **complete ordered result set** (never a delta) into the subscriber's
//! channel.
//!
//! Uses the `libsql` crate — native `SQLite` fork with a stable async API.

pub mod document;
pub mod error;
mod migrations;
mod ops;
pub mod query;
pub mod subscribe;

pub use document::{Document, collection_id_of, doc_path, validate_collection_path};
pub use error::StoreError;
pub use query::{FieldFilter, Query, QuerySource, SnapshotOrder};
pub use subscribe::{Delivery, Subscription};

use std::sync::{Arc, Mutex};

use libsql::Builder;

use subscribe::Registry;

/// Handle to the document store. Cheap to clone; all clones share the
/// same database connection and subscription registry.
#[derive(Clone)]
pub struct WaveStore {
    inner: Arc<StoreInner>,
}

pub(crate) struct StoreInner {
    #[allow(dead_code)]
    db: libsql::Database,
    pub(crate) conn: libsql::Connection,
    pub(crate) registry: Mutex<Registry>,
}

impl WaveStore {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let store = Self {
            inner: Arc::new(StoreInner {
                db,
                conn,
                registry: Mutex::new(Registry::default()),
            }),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> &libsql::Connection {
        &self.inner.conn
    }

    /// Generate a store-assigned document id: 20 lowercase hex chars.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT lower(hex(randomblob(10)))", ())
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("id generation returned no rows".to_string()))?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_store() -> WaveStore {
        WaveStore::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let store = test_store().await;
        let mut rows = store
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='documents'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let store = test_store().await;
        store.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_format() {
        let store = test_store().await;
        let id = store.generate_id().await.unwrap();
        assert_eq!(id.len(), 20, "20 hex chars: {id}");
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.db");
        let path = path.to_str().unwrap();

        let id = {
            let store = WaveStore::open_local(path).await.unwrap();
            store
                .add("tasks", serde_json::json!({"title": "durable"}))
                .await
                .unwrap()
                .id
        };

        let store = WaveStore::open_local(path).await.unwrap();
        let doc = store.get("tasks", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["title"], serde_json::json!("durable"));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let store = test_store().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = store.generate_id().await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }
}
