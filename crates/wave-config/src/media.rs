//! Blob storage configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Root directory for the local filesystem blob store.
    #[serde(default)]
    pub root: String,

    /// Public base URL under which uploaded objects are retrievable.
    #[serde(default)]
    pub public_base_url: String,
}

impl MediaConfig {
    /// Check if the media config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.root.is_empty() && !self.public_base_url.is_empty()
    }
}
