//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of featured tasks shown before "show all".
const fn default_featured_preview_limit() -> u32 {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Featured tasks shown on the landing feed before expansion.
    #[serde(default = "default_featured_preview_limit")]
    pub featured_preview_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            featured_preview_limit: default_featured_preview_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.featured_preview_limit, 8);
    }
}
