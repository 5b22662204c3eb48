//! Mutation workflows.
//!
//! Each workflow validates its inputs before touching the store, writes
//! exactly what it says, and returns. No retries, no compensation; a
//! failed external call surfaces as-is.

mod bids;
mod profile;
mod tasks;

pub use bids::{BidDecision, PlacedBid, cancel_bid, place_bid, update_bid_status};
pub use profile::ProfileEditor;
pub use tasks::post_task;
