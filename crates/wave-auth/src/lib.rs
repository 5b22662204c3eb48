//! # wave-auth
//!
//! Session identity as an explicit single-writer channel.
//!
//! There is no ambient auth singleton; the writer side is a value you
//! have to hold. `session_channel()` returns a [`SessionWriter`] (the
//! adapter boundary an auth provider callback would drive) and a
//! [`SessionContext`] (the read-only, cloneable view everything else
//! consumes). Profile edits go through a narrowed [`ProfileUpdater`]
//! that can only touch the display name and photo URL.

pub mod error;

pub use error::AuthError;

use tokio::sync::watch;

use wave_core::identity::SessionIdentity;

/// Create a session channel with no signed-in identity.
///
/// There is exactly one writer per channel; contexts are cheap clones.
#[must_use]
pub fn session_channel() -> (SessionWriter, SessionContext) {
    let (tx, rx) = watch::channel(None);
    (SessionWriter { tx }, SessionContext { rx })
}

/// The single mutation boundary for session state.
pub struct SessionWriter {
    tx: watch::Sender<Option<SessionIdentity>>,
}

impl SessionWriter {
    /// Replace the current session with a signed-in identity.
    pub fn sign_in(&self, identity: SessionIdentity) {
        tracing::debug!(uid = %identity.uid, "session signed in");
        let _ = self.tx.send(Some(identity));
    }

    /// Clear the current session.
    pub fn sign_out(&self) {
        tracing::debug!("session signed out");
        let _ = self.tx.send(None);
    }

    /// Hand out a writer narrowed to profile fields only.
    #[must_use]
    pub fn profile_updater(&self) -> ProfileUpdater {
        ProfileUpdater {
            tx: self.tx.clone(),
        }
    }
}

/// Narrowed writer: may update `display_name` and `photo_url` of the
/// signed-in identity and nothing else.
pub struct ProfileUpdater {
    tx: watch::Sender<Option<SessionIdentity>>,
}

impl ProfileUpdater {
    /// Apply profile fields to the current session. `None` leaves the
    /// corresponding field untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignedOut`] if there is no active session.
    pub fn apply(
        &self,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Result<(), AuthError> {
        let mut updated = Err(AuthError::SignedOut);
        self.tx.send_modify(|session| {
            if let Some(identity) = session.as_mut() {
                if let Some(name) = display_name.clone() {
                    identity.display_name = name;
                }
                if let Some(url) = photo_url.clone() {
                    identity.photo_url = url;
                }
                updated = Ok(());
            }
        });
        updated
    }
}

/// Read-only consumer view of the session.
#[derive(Clone)]
pub struct SessionContext {
    rx: watch::Receiver<Option<SessionIdentity>>,
}

impl SessionContext {
    /// Snapshot of the current identity, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<SessionIdentity> {
        self.rx.borrow().clone()
    }

    /// Uid of the signed-in user, if any.
    #[must_use]
    pub fn uid(&self) -> Option<String> {
        self.rx.borrow().as_ref().map(|s| s.uid.clone())
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the session state to change.
    ///
    /// Returns `None` once the writer is gone.
    pub async fn changed(&mut self) -> Option<Option<SessionIdentity>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity(uid: &str) -> SessionIdentity {
        SessionIdentity {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            display_name: "Asha".to_string(),
            photo_url: String::new(),
        }
    }

    #[test]
    fn starts_signed_out() {
        let (_writer, ctx) = session_channel();
        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.current(), None);
        assert_eq!(ctx.uid(), None);
    }

    #[test]
    fn sign_in_and_out_roundtrip() {
        let (writer, ctx) = session_channel();
        writer.sign_in(identity("u1"));
        assert!(ctx.is_signed_in());
        assert_eq!(ctx.uid().as_deref(), Some("u1"));

        writer.sign_out();
        assert!(!ctx.is_signed_in());
    }

    #[test]
    fn contexts_are_shared_views() {
        let (writer, ctx) = session_channel();
        let other = ctx.clone();
        writer.sign_in(identity("u1"));
        assert_eq!(ctx.uid(), other.uid());
    }

    #[test]
    fn profile_updater_touches_only_profile_fields() {
        let (writer, ctx) = session_channel();
        writer.sign_in(identity("u1"));

        let updater = writer.profile_updater();
        updater
            .apply(Some("Asha K".to_string()), Some("http://x/p.png".to_string()))
            .unwrap();

        let current = ctx.current().unwrap();
        assert_eq!(current.display_name, "Asha K");
        assert_eq!(current.photo_url, "http://x/p.png");
        assert_eq!(current.uid, "u1");
        assert_eq!(current.email, "u1@example.com");
    }

    #[test]
    fn profile_update_with_none_leaves_field() {
        let (writer, ctx) = session_channel();
        writer.sign_in(identity("u1"));

        writer.profile_updater().apply(None, None).unwrap();
        assert_eq!(ctx.current().unwrap().display_name, "Asha");
    }

    #[test]
    fn profile_update_requires_session() {
        let (writer, _ctx) = session_channel();
        let result = writer.profile_updater().apply(Some("x".to_string()), None);
        assert!(matches!(result, Err(AuthError::SignedOut)));
    }

    #[tokio::test]
    async fn changed_observes_sign_in() {
        let (writer, mut ctx) = session_channel();
        writer.sign_in(identity("u1"));
        let state = ctx.changed().await.unwrap();
        assert_eq!(state.unwrap().uid, "u1");
    }
}
