use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;
use crate::identity::UserRef;

/// A postable unit of work with budget, deadline, and owner.
///
/// The identifier is assigned by the store on creation and immutable
/// afterwards; views merge it onto the stored fields when mapping a
/// document snapshot to an entity. The owner identity is set at creation
/// and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    /// Store-assigned identifier, merged in at read time.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Date string as entered by the poster (not parsed).
    #[serde(default)]
    pub deadline: String,
    /// Loosely numeric: a number for tasks posted in-app, sometimes a
    /// range string (e.g. `"₹50 - ₹500"`) for imported records.
    #[serde(default)]
    pub budget: serde_json::Value,
    #[serde(default)]
    pub owner: UserRef,
    /// Promotional placement flag; featured tasks are excluded from the
    /// standard browse listing.
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: TaskStatus,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional emoji logo shown on listing cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic_logo: Option<String>,
}

/// Fields supplied by a poster (or an import file) for a new task.
///
/// Owner identity, featured flag, and creation timestamp are filled in by
/// the posting workflow or the import utility, never by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub budget: serde_json::Value,
    /// Import files may carry an explicit status; defaults to `open`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic_logo: Option<String>,
}
