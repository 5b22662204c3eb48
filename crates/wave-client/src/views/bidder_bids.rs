//! Cross-task view of one bidder's bids.

use serde_json::json;

use wave_auth::SessionContext;
use wave_core::entities::Bid;
use wave_store::{Delivery, Query, Subscription, WaveStore};

use super::{ViewDelivery, map_document};
use crate::error::ClientError;

/// Every bid the signed-in user has placed, across all tasks.
///
/// Backed by a collection-group query over all `bids` sub-collections
/// filtered on `bidder.uid`. Constructed with a signed-out context it is
/// quiescent: no subscription is registered and no delivery ever arrives.
pub struct BidderBids {
    sub: Option<Subscription>,
}

impl BidderBids {
    /// Subscribe to the session user's bids, or to nothing when signed
    /// out.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the subscription cannot be
    /// established.
    pub async fn subscribe(
        store: &WaveStore,
        session: &SessionContext,
    ) -> Result<Self, ClientError> {
        let Some(uid) = session.uid() else {
            return Ok(Self { sub: None });
        };
        let sub = store
            .subscribe(Query::group("bids").where_eq("bidder.uid", json!(uid)))
            .await?;
        Ok(Self { sub: Some(sub) })
    }

    /// Whether this view holds a live subscription.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.sub.is_some()
    }

    fn map(delivery: &Delivery) -> ViewDelivery<Vec<Bid>> {
        match delivery {
            Delivery::Snapshot(docs) => {
                let mut bids = Vec::with_capacity(docs.len());
                for doc in docs {
                    let bid: Bid = match map_document(doc) {
                        Ok(bid) => bid,
                        Err(e) => return ViewDelivery::Failed(format!("malformed document: {e}")),
                    };
                    // The denormalized task_id is authoritative; the
                    // storage path carries the same id and a mismatch
                    // means a corrupt record.
                    if let Some(parent) = doc.parent_document_id() {
                        if parent != bid.task_id {
                            tracing::warn!(
                                bid_id = %bid.id,
                                field_task_id = %bid.task_id,
                                path_task_id = %parent,
                                "bid task_id disagrees with its storage path"
                            );
                        }
                    }
                    bids.push(bid);
                }
                ViewDelivery::Snapshot(bids)
            }
            Delivery::Failed(reason) => ViewDelivery::Failed(reason.clone()),
        }
    }

    /// The most recent delivery; an empty snapshot when quiescent.
    pub fn latest(&mut self) -> ViewDelivery<Vec<Bid>> {
        match &mut self.sub {
            Some(sub) => {
                let raw = sub.latest();
                Self::map(&raw)
            }
            None => ViewDelivery::Snapshot(Vec::new()),
        }
    }

    /// Wait for the next delivery. Returns `None` immediately when
    /// quiescent.
    pub async fn next(&mut self) -> Option<ViewDelivery<Vec<Bid>>> {
        let sub = self.sub.as_mut()?;
        let raw = sub.next().await?;
        Some(Self::map(&raw))
    }
}
