//! Live views over the document store.
//!
//! Each view wraps a store subscription and maps raw document snapshots
//! to typed entities. A delivery is always the complete current result
//! set; mapping failures surface as a `Failed` delivery rather than a
//! silently shortened one.

mod bid_board;
mod bidder_bids;
mod task_detail;
mod task_feed;

pub use bid_board::BidBoard;
pub use bidder_bids::BidderBids;
pub use task_detail::TaskDetail;
pub use task_feed::{TaskFeed, TaskFilter};

use serde::de::DeserializeOwned;

use wave_store::{Delivery, Document};

/// One mapped delivery from a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewDelivery<T> {
    /// The complete current result, mapped to entities.
    Snapshot(T),
    /// The underlying query failed or a document did not map.
    Failed(String),
}

impl<T> ViewDelivery<T> {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Map one document to an entity, merging the store-assigned id into the
/// body before decoding.
pub(crate) fn map_document<T: DeserializeOwned>(doc: &Document) -> Result<T, serde_json::Error> {
    let mut data = doc.data.clone();
    data["id"] = serde_json::Value::String(doc.id.clone());
    serde_json::from_value(data)
}

/// Map a raw store delivery into a list of entities.
pub(crate) fn map_delivery<T: DeserializeOwned>(delivery: &Delivery) -> ViewDelivery<Vec<T>> {
    match delivery {
        Delivery::Snapshot(docs) => {
            match docs.iter().map(map_document).collect::<Result<Vec<T>, _>>() {
                Ok(entities) => ViewDelivery::Snapshot(entities),
                Err(e) => ViewDelivery::Failed(format!("malformed document: {e}")),
            }
        }
        Delivery::Failed(reason) => ViewDelivery::Failed(reason.clone()),
    }
}
