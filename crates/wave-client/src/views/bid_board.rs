//! Per-task bid board.

use wave_core::entities::Bid;
use wave_store::{Query, Subscription, WaveStore};

use super::{ViewDelivery, map_delivery};
use crate::error::ClientError;

/// Live view of one task's nested bid collection, in insertion order.
///
/// Powers the bid count on the detail page and the owner's
/// accept/decline controls. There is no read authorization on bids;
/// any caller can subscribe to any task's board.
pub struct BidBoard {
    sub: Subscription,
}

impl BidBoard {
    /// Subscribe to the bids of one task.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the subscription cannot be
    /// established.
    pub async fn subscribe(store: &WaveStore, task_id: &str) -> Result<Self, ClientError> {
        let sub = store
            .subscribe(Query::collection(format!("tasks/{task_id}/bids")))
            .await?;
        Ok(Self { sub })
    }

    /// The most recent delivery, marking it seen.
    pub fn latest(&mut self) -> ViewDelivery<Vec<Bid>> {
        let raw = self.sub.latest();
        map_delivery(&raw)
    }

    /// Wait for the next delivery.
    pub async fn next(&mut self) -> Option<ViewDelivery<Vec<Bid>>> {
        let raw = self.sub.next().await?;
        Some(map_delivery(&raw))
    }
}
