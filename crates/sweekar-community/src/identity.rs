//! Signed-in user observation.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::CommunityError;

/// Author name shown when a user has no display name.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider user id.
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            avatar_url: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The name attached to comments this user writes.
    #[must_use]
    pub fn author_name(&self) -> &str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS,
        }
    }
}

/// Holds the current session and lets any number of observers follow
/// sign-in and sign-out.
#[derive(Debug)]
pub struct SessionHub {
    current: watch::Sender<Option<UserProfile>>,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    pub fn sign_in(&self, user: UserProfile) {
        tracing::info!(uid = %user.uid, "signed in");
        self.current.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.current.send_replace(None) {
            tracing::info!(uid = %previous.uid, "signed out");
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    /// The signed-in user, or [`CommunityError::NotSignedIn`].
    ///
    /// # Errors
    ///
    /// Returns [`CommunityError::NotSignedIn`] when nobody is signed in.
    pub fn require_user(&self) -> Result<UserProfile, CommunityError> {
        self.current().ok_or(CommunityError::NotSignedIn)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }
}
