//! Live single-task view.

use wave_core::entities::Task;
use wave_store::{Delivery, Query, Subscription, WaveStore, doc_path};

use super::{ViewDelivery, map_document};
use crate::error::ClientError;

/// Live view of one task document.
///
/// A `Snapshot(None)` delivery means the task does not exist (deleted or
/// never created) — distinct from `Failed`.
pub struct TaskDetail {
    sub: Subscription,
}

impl TaskDetail {
    /// Subscribe to a single task by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the subscription cannot be
    /// established.
    pub async fn subscribe(store: &WaveStore, task_id: &str) -> Result<Self, ClientError> {
        let sub = store.subscribe(Query::doc(doc_path("tasks", task_id))).await?;
        Ok(Self { sub })
    }

    fn map(delivery: &Delivery) -> ViewDelivery<Option<Task>> {
        match delivery {
            Delivery::Snapshot(docs) => match docs.first() {
                None => ViewDelivery::Snapshot(None),
                Some(doc) => match map_document(doc) {
                    Ok(task) => ViewDelivery::Snapshot(Some(task)),
                    Err(e) => ViewDelivery::Failed(format!("malformed document: {e}")),
                },
            },
            Delivery::Failed(reason) => ViewDelivery::Failed(reason.clone()),
        }
    }

    /// The most recent delivery, marking it seen.
    pub fn latest(&mut self) -> ViewDelivery<Option<Task>> {
        let raw = self.sub.latest();
        Self::map(&raw)
    }

    /// Wait for the next delivery.
    pub async fn next(&mut self) -> Option<ViewDelivery<Option<Task>>> {
        let raw = self.sub.next().await?;
        Some(Self::map(&raw))
    }
}
