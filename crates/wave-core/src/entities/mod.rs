//! Entity structs for Lancewave domain objects.

mod bid;
mod task;

pub use bid::Bid;
pub use task::{Task, TaskDraft};
