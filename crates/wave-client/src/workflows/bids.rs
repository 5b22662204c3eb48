//! Bid submission, decision, and cancellation.

use serde_json::json;

use wave_auth::SessionContext;
use wave_core::entities::Bid;
use wave_core::enums::BidStatus;
use wave_store::WaveStore;

use crate::error::ClientError;
use crate::views::map_document;

/// Owner's decision on a pending bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    Accept,
    Decline,
}

impl BidDecision {
    #[must_use]
    pub const fn status(self) -> BidStatus {
        match self {
            Self::Accept => BidStatus::Accepted,
            Self::Decline => BidStatus::Declined,
        }
    }
}

/// Result of a successful bid submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBid {
    pub bid: Bid,
    /// Route the client navigates to after submitting.
    pub detail_route: String,
}

/// Parse a user-entered amount: a number strictly greater than zero.
fn parse_amount(input: &str) -> Option<f64> {
    let amount: f64 = input.trim().parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Submit a bid against a task.
///
/// Writes one pending bid with the bidder's identity, the denormalized
/// task id, and the task owner's uid. There is no duplicate-bid
/// constraint; a second submission creates a second bid.
///
/// # Errors
///
/// - `ClientError::Unauthenticated` when signed out, carrying the bid
///   route to resume at;
/// - `ClientError::InvalidAmount` for amounts that do not parse or are
///   not strictly positive (raised before any store call);
/// - `ClientError::TaskNotFound` when the task no longer exists.
pub async fn place_bid(
    store: &WaveStore,
    session: &SessionContext,
    task_id: &str,
    amount_input: &str,
    message: &str,
) -> Result<PlacedBid, ClientError> {
    let Some(identity) = session.current() else {
        return Err(ClientError::Unauthenticated {
            resume_to: format!("/task-details/{task_id}/bid"),
        });
    };

    let Some(amount) = parse_amount(amount_input) else {
        return Err(ClientError::InvalidAmount {
            input: amount_input.to_string(),
        });
    };

    let task_doc = store
        .get("tasks", task_id)
        .await?
        .ok_or_else(|| ClientError::TaskNotFound {
            task_id: task_id.to_string(),
        })?;
    let task_owner_uid = task_doc.data["owner"]["uid"].as_str().map(str::to_string);

    let doc = store
        .add(
            &format!("tasks/{task_id}/bids"),
            json!({
                "task_id": task_id,
                "task_owner_uid": task_owner_uid,
                "bidder": identity.as_user_ref(),
                "amount": amount,
                "message": message,
                "status": BidStatus::Pending,
            }),
        )
        .await?;

    tracing::info!(task_id, bid_id = %doc.id, amount, "bid placed");

    Ok(PlacedBid {
        bid: map_document(&doc)?,
        detail_route: format!("/task-details/{task_id}"),
    })
}

/// Apply the owner's decision to one bid.
///
/// The write is a blind single-field status update: a decided bid can be
/// overridden, and sibling bids on the same task are never touched. An
/// override that the transition table disallows is logged, not blocked.
///
/// # Errors
///
/// Returns `ClientError::Store` if the bid does not exist or the write
/// fails.
pub async fn update_bid_status(
    store: &WaveStore,
    task_id: &str,
    bid_id: &str,
    decision: BidDecision,
) -> Result<(), ClientError> {
    let collection = format!("tasks/{task_id}/bids");

    if let Some(doc) = store.get(&collection, bid_id).await? {
        let current: BidStatus =
            serde_json::from_value(doc.data["status"].clone()).unwrap_or_default();
        if !current.can_transition_to(decision.status()) {
            tracing::warn!(
                task_id,
                bid_id,
                from = %current,
                to = %decision.status(),
                "overriding a decided bid"
            );
        }
    }

    store
        .update(&collection, bid_id, json!({ "status": decision.status() }))
        .await?;
    tracing::info!(task_id, bid_id, status = %decision.status(), "bid status updated");
    Ok(())
}

/// Withdraw a bid: hard delete, no tombstone.
///
/// # Errors
///
/// Returns `ClientError::Store` if the delete fails. Deleting an
/// already-removed bid is a no-op.
pub async fn cancel_bid(store: &WaveStore, task_id: &str, bid_id: &str) -> Result<(), ClientError> {
    store.delete(&format!("tasks/{task_id}/bids"), bid_id).await?;
    tracing::info!(task_id, bid_id, "bid cancelled");
    Ok(())
}
