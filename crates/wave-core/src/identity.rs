use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimal user reference denormalized onto tasks and bids.
///
/// Set at creation time and immutable afterwards. The `name` mirrors the
/// display name the auth provider held when the record was written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserRef {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Ephemeral mirror of the auth provider's current user.
///
/// Not persisted by this code; session continuity is owned by the external
/// auth provider. Undefined (absent) when logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionIdentity {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub photo_url: String,
}

impl SessionIdentity {
    /// Reference form for denormalizing onto a new record.
    #[must_use]
    pub fn as_user_ref(&self) -> UserRef {
        UserRef {
            uid: self.uid.clone(),
            email: self.email.clone(),
            name: self.display_name.clone(),
        }
    }
}
