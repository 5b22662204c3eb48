//! Client error taxonomy.
//!
//! Validation errors are raised before any store call; external failures
//! pass through as `Store`/`Media` variants without retries or masking.
//! `Unauthenticated` is a redirect value carrying the path to resume at
//! after sign-in, not a fault.

use thiserror::Error;

use wave_auth::AuthError;
use wave_media::MediaError;
use wave_store::StoreError;

/// Errors from views and workflows.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The workflow needs a signed-in session. Carries the route the
    /// caller should return to after signing in.
    #[error("Sign in required (resume at {resume_to})")]
    Unauthenticated { resume_to: String },

    /// Bid amount did not parse as a number strictly greater than zero.
    #[error("Invalid bid amount: {input:?}")]
    InvalidAmount { input: String },

    /// Task title is empty after trimming.
    #[error("Task title must not be empty")]
    InvalidTitle,

    /// Display name is empty after trimming.
    #[error("Display name must not be empty")]
    InvalidName,

    /// The task a bid targets does not exist.
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// A profile-editor call that requires edit mode arrived in view mode.
    #[error("Profile editor is not in edit mode")]
    NotEditing,

    /// A stored document did not map onto its entity type.
    #[error("Malformed document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Session state error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Blob storage error.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Document store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
