//! # wave-media
//!
//! Profile image storage over [`object_store`].
//!
//! The bucket is any `object_store::ObjectStore` (local filesystem in
//! production, in-memory in tests); an upload is validated, written
//! under a per-user timestamped key, and resolved to a public URL
//! joined onto the configured base.

pub mod error;

pub use error::MediaError;

use std::sync::Arc;

use chrono::Utc;
use object_store::ObjectStore;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;

use wave_config::MediaConfig;

/// Upload ceiling enforced before any storage call.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A stored blob: its object key and the public URL it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: String,
    pub url: String,
}

/// Blob store handle. Cheap to clone.
#[derive(Clone)]
pub struct MediaStore {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl MediaStore {
    /// Wrap an existing object store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into(),
        }
    }

    /// Local-filesystem store rooted at the configured media directory.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::NotConfigured`] if root or base URL is
    /// missing, or an error if the root cannot be created or opened.
    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        if !config.is_configured() {
            return Err(MediaError::NotConfigured);
        }
        std::fs::create_dir_all(&config.root)
            .map_err(|e| anyhow::anyhow!("failed to create media root '{}': {e}", config.root))?;
        let store = LocalFileSystem::new_with_prefix(&config.root)?;
        Ok(Self::new(Arc::new(store), config.public_base_url.clone()))
    }

    /// In-memory store, for tests.
    #[must_use]
    pub fn in_memory(public_base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(InMemory::new()), public_base_url)
    }

    /// Validate and store a profile image under
    /// `profile-images/{uid}/{millis}`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::InvalidFile`] for non-image content types,
    /// [`MediaError::FileTooLarge`] above [`MAX_IMAGE_BYTES`], or an
    /// object store error if the write fails. Validation happens before
    /// any storage call.
    pub async fn upload_profile_image(
        &self,
        uid: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, MediaError> {
        if !content_type.starts_with("image/") {
            return Err(MediaError::InvalidFile {
                content_type: content_type.to_string(),
            });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::FileTooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        let key = format!("profile-images/{uid}/{}", Utc::now().timestamp_millis());
        tracing::debug!(uid, file_name, content_type, key, "uploading profile image");

        self.store
            .put(&ObjectPath::from(key.as_str()), bytes.into())
            .await?;

        let url = self.resolve_url(&key);
        Ok(StoredImage { path: key, url })
    }

    /// Public URL for an object key, joining on a single slash.
    #[must_use]
    pub fn resolve_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_store() -> MediaStore {
        MediaStore::in_memory("https://media.example")
    }

    #[tokio::test]
    async fn upload_stores_bytes_under_user_key() {
        let media = test_store();
        let data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let stored = media
            .upload_profile_image("u1", "avatar.jpg", "image/jpeg", data.clone())
            .await
            .unwrap();

        assert!(stored.path.starts_with("profile-images/u1/"));
        assert_eq!(stored.url, format!("https://media.example/{}", stored.path));

        let fetched = media
            .store
            .get(&ObjectPath::from(stored.path.as_str()))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(fetched.as_ref(), data.as_slice());
    }

    #[tokio::test]
    async fn non_image_content_type_is_rejected() {
        let media = test_store();
        let result = media
            .upload_profile_image("u1", "resume.pdf", "application/pdf", vec![1])
            .await;
        assert!(matches!(result, Err(MediaError::InvalidFile { .. })));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let media = test_store();
        let result = media
            .upload_profile_image("u1", "big.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1])
            .await;
        assert!(matches!(result, Err(MediaError::FileTooLarge { .. })));
    }

    #[tokio::test]
    async fn upload_at_exact_limit_is_accepted() {
        let media = test_store();
        media
            .upload_profile_image("u1", "edge.png", "image/png", vec![0; MAX_IMAGE_BYTES])
            .await
            .unwrap();
    }

    #[test]
    fn resolve_url_normalizes_slashes() {
        let media = MediaStore::in_memory("https://media.example/");
        assert_eq!(
            media.resolve_url("/profile-images/u1/1"),
            "https://media.example/profile-images/u1/1"
        );
    }

    #[test]
    fn from_config_requires_root_and_base_url() {
        let result = MediaStore::from_config(&MediaConfig::default());
        assert!(matches!(result, Err(MediaError::NotConfigured)));
    }

    #[test]
    fn from_config_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = MediaConfig {
            root: dir.path().join("media").to_string_lossy().into_owned(),
            public_base_url: "https://media.example".to_string(),
        };
        MediaStore::from_config(&config).unwrap();
        assert!(dir.path().join("media").is_dir());
    }
}
