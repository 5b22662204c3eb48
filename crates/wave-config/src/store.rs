//! Document store configuration.

use serde::{Deserialize, Serialize};

/// Default database file path.
fn default_path() -> String {
    String::from("lancewave.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file, or `":memory:"` for ephemeral use.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// Whether the store is ephemeral (no file persistence).
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_file() {
        let config = StoreConfig::default();
        assert_eq!(config.path, "lancewave.db");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn memory_path_detected() {
        let config = StoreConfig {
            path: ":memory:".into(),
        };
        assert!(config.is_in_memory());
    }
}
