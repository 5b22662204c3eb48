//! Live-query subscriptions.
//!
//! A subscription holds a `tokio::sync::watch` receiver. After every
//! relevant write the store re-evaluates the query and sends the complete
//! ordered result set into the channel; the channel keeps only the latest
//! snapshot, so slow consumers observe the current state rather than a
//! backlog of intermediate ones. Dropping the `Subscription` unregisters
//! the query, exactly once.

use std::collections::HashMap;

use tokio::sync::watch;

use crate::StoreInner;
use crate::WaveStore;
use crate::document::{Document, collection_id_of};
use crate::error::StoreError;
use crate::query::Query;

/// One delivery pushed into a subscriber's channel.
///
/// An empty `Snapshot` means the query currently matches nothing; a
/// `Failed` delivery means re-evaluation errored. The two are never
/// conflated.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// The complete ordered result set as of the latest write.
    Snapshot(Vec<Document>),
    /// Query re-evaluation failed.
    Failed(String),
}

impl Delivery {
    /// Documents of a successful delivery, or an empty slice for failures.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        match self {
            Self::Snapshot(docs) => docs,
            Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

struct Registered {
    query: Query,
    tx: watch::Sender<Delivery>,
    /// Sequence of the newest write this subscription was delivered.
    last_sent: u64,
}

/// Registry of live queries, keyed by a monotonically increasing id.
#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    /// Monotonic write counter; deliveries are tagged with the write
    /// that triggered them so a slow re-evaluation cannot clobber a
    /// newer snapshot.
    write_seq: u64,
    subs: HashMap<u64, Registered>,
}

impl Registry {
    fn register(&mut self, query: Query, tx: watch::Sender<Delivery>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.subs.insert(
            id,
            Registered {
                query,
                tx,
                last_sent: 0,
            },
        );
        id
    }

    pub(crate) fn unregister(&mut self, id: u64) {
        self.subs.remove(&id);
    }

    pub(crate) fn len(&self) -> usize {
        self.subs.len()
    }
}

/// Unregisters the query when dropped.
struct ReleaseGuard {
    inner: std::sync::Arc<StoreInner>,
    id: u64,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.inner.registry.lock() {
            registry.unregister(self.id);
        }
    }
}

/// A live query handle. Holds the latest delivery; releases the
/// registration on drop.
pub struct Subscription {
    rx: watch::Receiver<Delivery>,
    _guard: ReleaseGuard,
}

impl Subscription {
    /// The most recent delivery, marking it seen.
    #[must_use]
    pub fn latest(&mut self) -> Delivery {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for a delivery newer than the last one seen, then return it.
    ///
    /// Returns `None` if the store side of the channel is gone.
    pub async fn next(&mut self) -> Option<Delivery> {
        self.rx.changed().await.ok()?;
        Some(self.latest())
    }
}

impl WaveStore {
    /// Register a live query. The returned subscription starts with the
    /// current result set already delivered.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the initial evaluation fails.
    pub async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError> {
        let initial = self.evaluate(&query).await?;
        let (tx, rx) = watch::channel(Delivery::Snapshot(initial));

        let id = {
            let mut registry = self
                .inner
                .registry
                .lock()
                .map_err(|_| StoreError::Query("subscription registry poisoned".to_string()))?;
            registry.register(query, tx)
        };

        Ok(Subscription {
            rx,
            _guard: ReleaseGuard {
                inner: std::sync::Arc::clone(&self.inner),
                id,
            },
        })
    }

    /// Number of currently registered live queries.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner
            .registry
            .lock()
            .map_or(0, |registry| registry.len())
    }

    /// Re-evaluate and deliver to every query watching `collection_path`.
    ///
    /// The registry lock is never held across an await: affected ids are
    /// collected first, each query evaluated, and the delivery sent only
    /// if the subscription is still registered. Deliveries carry the
    /// sequence of the write that triggered them; one that lost the race
    /// to a newer write is skipped rather than sent, so concurrent
    /// writers cannot leave a subscriber on a stale snapshot. A send
    /// into a channel whose receiver was dropped is ignored.
    pub(crate) async fn notify(&self, collection_path: &str) {
        let collection_id = collection_id_of(collection_path);

        let (seq, affected): (u64, Vec<(u64, Query)>) = match self.inner.registry.lock() {
            Ok(mut registry) => {
                registry.write_seq += 1;
                let affected = registry
                    .subs
                    .iter()
                    .filter(|(_, reg)| reg.query.watches(collection_path, collection_id))
                    .map(|(id, reg)| (*id, reg.query.clone()))
                    .collect();
                (registry.write_seq, affected)
            }
            Err(_) => return,
        };

        for (id, query) in affected {
            let delivery = match self.evaluate(&query).await {
                Ok(docs) => Delivery::Snapshot(docs),
                Err(e) => {
                    tracing::warn!(error = %e, "live query re-evaluation failed");
                    Delivery::Failed(e.to_string())
                }
            };
            if let Ok(mut registry) = self.inner.registry.lock() {
                if let Some(reg) = registry.subs.get_mut(&id) {
                    if reg.last_sent < seq {
                        reg.last_sent = seq;
                        let _ = reg.tx.send(delivery);
                    }
                }
            }
        }
    }
}
