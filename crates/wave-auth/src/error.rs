//! Session error types.

use thiserror::Error;

/// Errors from session state mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A profile update was attempted with no active session.
    #[error("No active session")]
    SignedOut,
}
