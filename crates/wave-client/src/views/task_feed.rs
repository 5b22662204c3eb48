//! Task listing feeds.

use serde_json::json;

use wave_core::entities::Task;
use wave_store::{Query, SnapshotOrder, Subscription, WaveStore};

use super::{ViewDelivery, map_delivery};
use crate::error::ClientError;

/// Which slice of the task collection a feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task.
    All,
    /// Only tasks flagged `featured` (home-page carousel).
    FeaturedOnly,
    /// Only non-featured tasks (the standard browse listing).
    RegularOnly,
}

/// Live task listing, newest first.
pub struct TaskFeed {
    sub: Subscription,
    filter: TaskFilter,
    preview_limit: Option<usize>,
}

impl TaskFeed {
    /// Subscribe to the task collection under the given filter.
    ///
    /// `FeaturedOnly` filters at the query layer, so a delivery can never
    /// contain a non-featured task. `RegularOnly` drops featured tasks
    /// after mapping, which also covers records missing the flag.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the subscription cannot be
    /// established.
    pub async fn subscribe(store: &WaveStore, filter: TaskFilter) -> Result<Self, ClientError> {
        let mut query = Query::collection("tasks").order_by(SnapshotOrder::CreatedDesc);
        if filter == TaskFilter::FeaturedOnly {
            query = query.where_eq("featured", json!(true));
        }
        let sub = store.subscribe(query).await?;
        Ok(Self {
            sub,
            filter,
            preview_limit: None,
        })
    }

    /// Cap each delivery to the first `limit` tasks. The home-page
    /// carousel uses this with `general.featured_preview_limit` from the
    /// configuration.
    #[must_use]
    pub const fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = Some(limit);
        self
    }

    fn map(&self, delivery: &wave_store::Delivery) -> ViewDelivery<Vec<Task>> {
        match map_delivery::<Task>(delivery) {
            ViewDelivery::Snapshot(mut tasks) => {
                if self.filter == TaskFilter::RegularOnly {
                    tasks.retain(|t| !t.featured);
                }
                if let Some(limit) = self.preview_limit {
                    tasks.truncate(limit);
                }
                ViewDelivery::Snapshot(tasks)
            }
            failed @ ViewDelivery::Failed(_) => failed,
        }
    }

    /// The most recent delivery, marking it seen.
    pub fn latest(&mut self) -> ViewDelivery<Vec<Task>> {
        let raw = self.sub.latest();
        self.map(&raw)
    }

    /// Wait for the next delivery.
    pub async fn next(&mut self) -> Option<ViewDelivery<Vec<Task>>> {
        let raw = self.sub.next().await?;
        Some(self.map(&raw))
    }
}
