use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BidStatus;
use crate::identity::UserRef;

/// A bidder's offer against a task.
///
/// Lives in the task's nested `bids` sub-collection; `task_id` is
/// denormalized onto the record and is the source of truth for the owning
/// task (the storage path carries the same id and is cross-checked by the
/// cross-task view). Bidder identity is set at creation and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bid {
    /// Store-assigned identifier, merged in at read time.
    #[serde(default)]
    pub id: String,
    /// Owning task identifier (exactly one).
    pub task_id: String,
    /// Uid of the task owner at submission time, for convenience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_owner_uid: Option<String>,
    pub bidder: UserRef,
    /// Strictly positive; validated before the record is written.
    pub amount: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: BidStatus,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}
