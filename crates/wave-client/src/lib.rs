//! # wave-client
//!
//! The marketplace data layer a UI would sit on: live views over the
//! document store and the mutation workflows that feed them.
//!
//! Views deliver complete mapped snapshots (see [`views::ViewDelivery`]);
//! workflows validate, write once, and return. Session identity comes in
//! as a read-only [`wave_auth::SessionContext`]; profile commits go out
//! through the narrowed [`wave_auth::ProfileUpdater`].

pub mod error;
pub mod views;
pub mod workflows;

pub use error::ClientError;
pub use views::{BidBoard, BidderBids, TaskDetail, TaskFeed, TaskFilter, ViewDelivery};
pub use workflows::{
    BidDecision, PlacedBid, ProfileEditor, cancel_bid, place_bid, post_task, update_bid_status,
};
