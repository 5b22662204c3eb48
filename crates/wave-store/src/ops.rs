//! Single-shot document operations: add, get, update, delete, and the
//! query evaluator shared with the subscription layer.
//!
//! Every mutation re-notifies the subscriptions watching the written
//! collection before returning, so an awaited write is observable in the
//! subscriber's channel as soon as the call completes.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::document::{Document, collection_id_of, doc_path, validate_collection_path};
use crate::error::StoreError;
use crate::query::{Query, QuerySource, SnapshotOrder, filter_matches};
use crate::WaveStore;

const SELECT_COLS: &str = "path, collection_path, doc_id, data, created_at";

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

fn row_to_document(row: &libsql::Row) -> Result<Document, StoreError> {
    Ok(Document {
        path: row.get(0)?,
        collection_path: row.get(1)?,
        id: row.get(2)?,
        data: serde_json::from_str(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn require_object(fields: &Value) -> Result<(), StoreError> {
    if fields.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidBody(format!(
            "expected a JSON object, got {fields}"
        )))
    }
}

impl WaveStore {
    /// Create a document with a store-assigned id and a server-assigned
    /// `created_at` merged into the stored fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the path is malformed, the body is not an
    /// object, or the write fails.
    pub async fn add(&self, collection_path: &str, fields: Value) -> Result<Document, StoreError> {
        validate_collection_path(collection_path)?;
        require_object(&fields)?;

        let id = self.generate_id().await?;
        let now = Utc::now();
        let mut data = fields;
        data["created_at"] = serde_json::to_value(now)?;

        let path = doc_path(collection_path, &id);
        self.conn()
            .execute(
                "INSERT INTO documents (path, collection_path, collection_id, doc_id, data, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    path.as_str(),
                    collection_path,
                    collection_id_of(collection_path),
                    id.as_str(),
                    serde_json::to_string(&data)?,
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.notify(collection_path).await;

        Ok(Document {
            path,
            id,
            collection_path: collection_path.to_string(),
            data,
            created_at: now,
        })
    }

    /// Read one document. `None` means not-found — distinct from errors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read itself fails.
    pub async fn get(
        &self,
        collection_path: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let path = doc_path(collection_path, id);
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM documents WHERE path = ?1"),
                [path.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    /// Merge the given top-level fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist.
    pub async fn update(
        &self,
        collection_path: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        require_object(&patch)?;
        let path = doc_path(collection_path, id);

        let existing = self
            .get(collection_path, id)
            .await?
            .ok_or_else(|| StoreError::NotFound { path: path.clone() })?;

        let mut data = existing.data;
        if let (Some(target), Some(source)) = (data.as_object_mut(), patch.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }

        self.conn()
            .execute(
                "UPDATE documents SET data = ?1 WHERE path = ?2",
                libsql::params![serde_json::to_string(&data)?, path.as_str()],
            )
            .await?;

        self.notify(collection_path).await;
        Ok(())
    }

    /// Hard-delete a document. Deleting an absent document is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete statement fails.
    pub async fn delete(&self, collection_path: &str, id: &str) -> Result<(), StoreError> {
        let path = doc_path(collection_path, id);
        let affected = self
            .conn()
            .execute("DELETE FROM documents WHERE path = ?1", [path.as_str()])
            .await?;

        if affected > 0 {
            self.notify(collection_path).await;
        }
        Ok(())
    }

    /// Evaluate a query to its complete current ordered result set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying read fails.
    pub(crate) async fn evaluate(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let order_sql = match query.order {
            SnapshotOrder::CreatedDesc => "ORDER BY created_at DESC, rowid DESC",
            SnapshotOrder::Insertion => "ORDER BY rowid ASC",
        };

        let (where_sql, param) = match &query.source {
            QuerySource::Collection(path) => ("collection_path = ?1", path.clone()),
            QuerySource::Group(id) => ("collection_id = ?1", id.clone()),
            QuerySource::Doc(path) => ("path = ?1", path.clone()),
        };

        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM documents WHERE {where_sql} {order_sql}"),
                [param.as_str()],
            )
            .await?;

        let mut docs = Vec::new();
        while let Some(row) = rows.next().await? {
            let doc = row_to_document(&row)?;
            if let Some(filter) = &query.filter {
                if !filter_matches(filter, &doc.data) {
                    continue;
                }
            }
            docs.push(doc);
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn test_store() -> WaveStore {
        WaveStore::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn add_assigns_id_and_timestamp() {
        let store = test_store().await;
        let doc = store
            .add("tasks", json!({"title": "Build a landing page"}))
            .await
            .unwrap();

        assert_eq!(doc.collection_path, "tasks");
        assert_eq!(doc.id.len(), 20);
        assert_eq!(doc.path, format!("tasks/{}", doc.id));
        assert_eq!(doc.data["title"], json!("Build a landing page"));
        assert!(doc.data["created_at"].is_string(), "server timestamp merged");
    }

    #[tokio::test]
    async fn get_roundtrip_and_not_found() {
        let store = test_store().await;
        let doc = store.add("tasks", json!({"title": "T"})).await.unwrap();

        let fetched = store.get("tasks", &doc.id).await.unwrap().unwrap();
        assert_eq!(fetched, doc);

        assert!(store.get("tasks", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = test_store().await;
        let doc = store
            .add("tasks", json!({"title": "T", "status": "open"}))
            .await
            .unwrap();

        store
            .update("tasks", &doc.id, json!({"status": "closed"}))
            .await
            .unwrap();

        let fetched = store.get("tasks", &doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.data["status"], json!("closed"));
        assert_eq!(fetched.data["title"], json!("T"), "untouched field kept");
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let store = test_store().await;
        let result = store.update("tasks", "nope", json!({"x": 1})).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = test_store().await;
        let doc = store.add("tasks", json!({"title": "T"})).await.unwrap();

        store.delete("tasks", &doc.id).await.unwrap();
        assert!(store.get("tasks", &doc.id).await.unwrap().is_none());

        // Second delete of the same id is a no-op, not an error.
        store.delete("tasks", &doc.id).await.unwrap();
    }

    #[tokio::test]
    async fn add_rejects_non_object_body() {
        let store = test_store().await;
        let result = store.add("tasks", json!([1, 2, 3])).await;
        assert!(matches!(result, Err(StoreError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn nested_collections_are_isolated() {
        let store = test_store().await;
        let t1 = store.add("tasks", json!({"title": "A"})).await.unwrap();
        let t2 = store.add("tasks", json!({"title": "B"})).await.unwrap();

        let b1_path = format!("tasks/{}/bids", t1.id);
        let b2_path = format!("tasks/{}/bids", t2.id);
        store.add(&b1_path, json!({"amount": 100})).await.unwrap();
        store.add(&b1_path, json!({"amount": 200})).await.unwrap();
        store.add(&b2_path, json!({"amount": 300})).await.unwrap();

        let b1 = store.evaluate(&Query::collection(&b1_path)).await.unwrap();
        let b2 = store.evaluate(&Query::collection(&b2_path)).await.unwrap();
        assert_eq!(b1.len(), 2);
        assert_eq!(b2.len(), 1);

        let all = store.evaluate(&Query::group("bids")).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn created_desc_orders_newest_first() {
        let store = test_store().await;
        let first = store.add("tasks", json!({"title": "first"})).await.unwrap();
        let second = store
            .add("tasks", json!({"title": "second"}))
            .await
            .unwrap();

        let docs = store
            .evaluate(&Query::collection("tasks").order_by(SnapshotOrder::CreatedDesc))
            .await
            .unwrap();
        assert_eq!(docs[0].id, second.id);
        assert_eq!(docs[1].id, first.id);
    }

    #[tokio::test]
    async fn field_filter_applies() {
        let store = test_store().await;
        store
            .add("tasks", json!({"title": "plain", "featured": false}))
            .await
            .unwrap();
        let featured = store
            .add("tasks", json!({"title": "starred", "featured": true}))
            .await
            .unwrap();

        let docs = store
            .evaluate(&Query::collection("tasks").where_eq("featured", json!(true)))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, featured.id);
    }
}
