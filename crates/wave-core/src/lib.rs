//! # wave-core
//!
//! Core types shared across all Lancewave crates:
//! - Entity structs for tasks, bids, and user identities
//! - Status enums with state machine transitions
//! - Indian-locale currency formatting

pub mod currency;
pub mod entities;
pub mod enums;
pub mod identity;
