//! Status enums for Lancewave entities.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `BidStatus` provides `allowed_next_states()` to enforce valid transitions at
//! the application layer; the store itself performs blind single-field updates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a posted task.
///
/// Only `open` is produced by the workflows in this repository; the other
/// states exist for records written by adjacent tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    Assigned,
    Closed,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BidStatus
// ---------------------------------------------------------------------------

/// Status of a bid through its lifecycle.
///
/// ```text
/// pending → accepted
///         → declined
/// ```
///
/// Both `accepted` and `declined` are terminal. Accepting one bid never
/// touches sibling bids on the same task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl BidStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Declined],
            Self::Accepted | Self::Declined => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the owner already acted on this bid.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(task_open, TaskStatus, TaskStatus::Open, "open");
    test_serde_roundtrip!(task_assigned, TaskStatus, TaskStatus::Assigned, "assigned");

    test_serde_roundtrip!(bid_pending, BidStatus, BidStatus::Pending, "pending");
    test_serde_roundtrip!(bid_accepted, BidStatus, BidStatus::Accepted, "accepted");
    test_serde_roundtrip!(bid_declined, BidStatus, BidStatus::Declined, "declined");

    #[test]
    fn bid_valid_transitions() {
        assert!(BidStatus::Pending.can_transition_to(BidStatus::Accepted));
        assert!(BidStatus::Pending.can_transition_to(BidStatus::Declined));
    }

    #[test]
    fn bid_terminal_states() {
        assert!(BidStatus::Accepted.allowed_next_states().is_empty());
        assert!(BidStatus::Declined.allowed_next_states().is_empty());
        assert!(!BidStatus::Accepted.can_transition_to(BidStatus::Pending));
        assert!(!BidStatus::Declined.can_transition_to(BidStatus::Accepted));
    }

    #[test]
    fn bid_decided() {
        assert!(!BidStatus::Pending.is_decided());
        assert!(BidStatus::Accepted.is_decided());
        assert!(BidStatus::Declined.is_decided());
    }

    #[test]
    fn defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Open);
        assert_eq!(BidStatus::default(), BidStatus::Pending);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TaskStatus::Open), "open");
        assert_eq!(format!("{}", BidStatus::Pending), "pending");
        assert_eq!(format!("{}", BidStatus::Declined), "declined");
    }
}
