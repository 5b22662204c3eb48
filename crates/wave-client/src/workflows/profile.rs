//! Profile editing state machine.

use wave_auth::{ProfileUpdater, SessionContext};
use wave_media::{MediaStore, StoredImage};

use crate::error::ClientError;

/// Scratch buffer holding in-progress edits. Nothing in here is visible
/// to the session until `save()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scratch {
    display_name: String,
    photo_url: String,
}

enum EditorState {
    Viewing,
    Editing(Scratch),
}

/// Two-state editor over the session profile: `Viewing ⇄ Editing`.
///
/// `begin_edit` snapshots the committed profile into a scratch buffer;
/// edits and uploads touch only the scratch; `save` commits it through
/// the narrowed [`ProfileUpdater`]; `cancel` discards it unconditionally.
/// A cancelled edit after an image upload leaves the blob behind in
/// storage with nothing referencing it.
pub struct ProfileEditor {
    session: SessionContext,
    updater: ProfileUpdater,
    media: MediaStore,
    state: EditorState,
}

impl ProfileEditor {
    #[must_use]
    pub const fn new(session: SessionContext, updater: ProfileUpdater, media: MediaStore) -> Self {
        Self {
            session,
            updater,
            media,
            state: EditorState::Viewing,
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// Enter edit mode, snapshotting the committed profile. A no-op when
    /// already editing.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthenticated` when signed out.
    pub fn begin_edit(&mut self) -> Result<(), ClientError> {
        if self.is_editing() {
            return Ok(());
        }
        let Some(identity) = self.session.current() else {
            return Err(ClientError::Unauthenticated {
                resume_to: "/profile".to_string(),
            });
        };
        self.state = EditorState::Editing(Scratch {
            display_name: identity.display_name,
            photo_url: identity.photo_url,
        });
        Ok(())
    }

    /// Stage a new display name in the scratch buffer.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotEditing` outside edit mode.
    pub fn set_display_name(&mut self, name: impl Into<String>) -> Result<(), ClientError> {
        match &mut self.state {
            EditorState::Editing(scratch) => {
                scratch.display_name = name.into();
                Ok(())
            }
            EditorState::Viewing => Err(ClientError::NotEditing),
        }
    }

    /// Display name currently staged, if editing.
    #[must_use]
    pub fn staged_display_name(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing(scratch) => Some(&scratch.display_name),
            EditorState::Viewing => None,
        }
    }

    /// Photo URL currently staged, if editing.
    #[must_use]
    pub fn staged_photo_url(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing(scratch) => Some(&scratch.photo_url),
            EditorState::Viewing => None,
        }
    }

    /// Validate, upload, and stage a new profile image. The committed
    /// profile is untouched until `save()`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotEditing` outside edit mode,
    /// `ClientError::Unauthenticated` when signed out, or a
    /// `ClientError::Media` validation/storage error.
    pub async fn upload_image(
        &mut self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ClientError> {
        if !self.is_editing() {
            return Err(ClientError::NotEditing);
        }
        let Some(uid) = self.session.uid() else {
            return Err(ClientError::Unauthenticated {
                resume_to: "/profile".to_string(),
            });
        };

        let stored = self
            .media
            .upload_profile_image(&uid, file_name, content_type, bytes)
            .await?;

        if let EditorState::Editing(scratch) = &mut self.state {
            scratch.photo_url.clone_from(&stored.url);
        }
        Ok(stored)
    }

    /// Commit the scratch buffer to the session profile and return to
    /// view mode.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotEditing` outside edit mode,
    /// `ClientError::InvalidName` for an empty trimmed display name
    /// (edit mode is kept so the caller can correct it), or an auth
    /// error if the session ended mid-edit.
    pub fn save(&mut self) -> Result<(), ClientError> {
        let EditorState::Editing(scratch) = &self.state else {
            return Err(ClientError::NotEditing);
        };

        let name = scratch.display_name.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidName);
        }

        self.updater
            .apply(Some(name.to_string()), Some(scratch.photo_url.clone()))?;
        self.state = EditorState::Viewing;
        Ok(())
    }

    /// Discard the scratch buffer unconditionally and return to view
    /// mode. An image uploaded during the edit stays in blob storage,
    /// unreferenced.
    pub fn cancel(&mut self) {
        self.state = EditorState::Viewing;
    }
}
