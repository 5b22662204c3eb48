//! Live-query descriptions.

use serde_json::Value;

/// What a query reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// One collection, root or nested (`tasks`, `tasks/{id}/bids`).
    Collection(String),
    /// Every collection with this leaf name, regardless of parent
    /// (`bids` matches all `tasks/{id}/bids` sub-collections).
    Group(String),
    /// A single document (`tasks/{id}`); the snapshot holds zero or one
    /// documents, and an empty snapshot means not-found, not failure.
    Doc(String),
}

/// Equality filter on one document field. Nested fields use dotted paths
/// (`bidder.uid`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub equals: Value,
}

/// Order of documents inside each snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotOrder {
    /// Creation timestamp descending (newest first) — the listing order.
    CreatedDesc,
    /// Natural insertion order.
    #[default]
    Insertion,
}

/// A subscribable query: source, optional field filter, snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub source: QuerySource,
    pub filter: Option<FieldFilter>,
    pub order: SnapshotOrder,
}

impl Query {
    /// All documents of one collection in insertion order.
    #[must_use]
    pub fn collection(path: impl Into<String>) -> Self {
        Self {
            source: QuerySource::Collection(path.into()),
            filter: None,
            order: SnapshotOrder::Insertion,
        }
    }

    /// All documents across same-named sub-collections.
    #[must_use]
    pub fn group(collection_id: impl Into<String>) -> Self {
        Self {
            source: QuerySource::Group(collection_id.into()),
            filter: None,
            order: SnapshotOrder::Insertion,
        }
    }

    /// A single document.
    #[must_use]
    pub fn doc(path: impl Into<String>) -> Self {
        Self {
            source: QuerySource::Doc(path.into()),
            filter: None,
            order: SnapshotOrder::Insertion,
        }
    }

    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, equals: Value) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            equals,
        });
        self
    }

    #[must_use]
    pub const fn order_by(mut self, order: SnapshotOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether a write into `collection_path` can affect this query's
    /// result set. Used to skip re-evaluation of unrelated subscriptions.
    #[must_use]
    pub fn watches(&self, collection_path: &str, collection_id: &str) -> bool {
        match &self.source {
            QuerySource::Collection(path) => path == collection_path,
            QuerySource::Group(id) => id == collection_id,
            QuerySource::Doc(path) => {
                path.rsplit_once('/')
                    .is_some_and(|(parent, _)| parent == collection_path)
            }
        }
    }
}

/// Look up a dotted field path inside a JSON body.
#[must_use]
pub fn field_value<'a>(data: &'a Value, field: &str) -> Option<&'a Value> {
    field.split('.').try_fold(data, |v, key| v.get(key))
}

/// Apply a filter to a document body.
#[must_use]
pub fn filter_matches(filter: &FieldFilter, data: &Value) -> bool {
    field_value(data, &filter.field) == Some(&filter.equals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_query_watches_only_its_path() {
        let q = Query::collection("tasks/t1/bids");
        assert!(q.watches("tasks/t1/bids", "bids"));
        assert!(!q.watches("tasks/t2/bids", "bids"));
        assert!(!q.watches("tasks", "tasks"));
    }

    #[test]
    fn group_query_watches_any_parent() {
        let q = Query::group("bids");
        assert!(q.watches("tasks/t1/bids", "bids"));
        assert!(q.watches("tasks/t2/bids", "bids"));
        assert!(!q.watches("tasks", "tasks"));
    }

    #[test]
    fn doc_query_watches_containing_collection() {
        let q = Query::doc("tasks/t1");
        assert!(q.watches("tasks", "tasks"));
        assert!(!q.watches("tasks/t1/bids", "bids"));
    }

    #[test]
    fn dotted_field_lookup() {
        let data = json!({"bidder": {"uid": "u1"}, "amount": 50});
        assert_eq!(field_value(&data, "bidder.uid"), Some(&json!("u1")));
        assert_eq!(field_value(&data, "amount"), Some(&json!(50)));
        assert_eq!(field_value(&data, "bidder.email"), None);
    }

    #[test]
    fn filter_equality() {
        let data = json!({"featured": true});
        let on = FieldFilter {
            field: "featured".into(),
            equals: json!(true),
        };
        let off = FieldFilter {
            field: "featured".into(),
            equals: json!(false),
        };
        assert!(filter_matches(&on, &data));
        assert!(!filter_matches(&off, &data));
    }
}
