//! Signed-in interactions with resources: the session hub in front of a
//! community store.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::identity::{SessionHub, UserProfile};
use crate::store::{CommunityStore, Result};
use crate::types::{Comment, LikeSummary};

/// What the profile page shows for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileActivity {
    pub user: UserProfile,
    pub liked_places: Vec<String>,
    pub comments: Vec<Comment>,
}

/// Reads are open to everyone; writes and profile activity need a signed-in
/// user.
pub struct Community {
    sessions: SessionHub,
    store: Arc<dyn CommunityStore>,
}

impl Community {
    #[must_use]
    pub fn new(store: Arc<dyn CommunityStore>) -> Self {
        Self {
            sessions: SessionHub::new(),
            store,
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionHub {
        &self.sessions
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CommunityStore> {
        &self.store
    }

    /// # Errors
    ///
    /// [`CommunityError::NotSignedIn`](crate::CommunityError::NotSignedIn)
    /// when nobody is signed in, or a store error.
    pub async fn toggle_like(&self, place_id: &str) -> Result<LikeSummary> {
        let user = self.sessions.require_user()?;
        self.store.toggle_like(&user, place_id).await
    }

    /// # Errors
    ///
    /// Returns a store error.
    pub async fn like_summary(&self, place_id: &str) -> Result<LikeSummary> {
        self.store.like_summary(place_id).await
    }

    /// # Errors
    ///
    /// `NotSignedIn`, `EmptyComment`, or a store error.
    pub async fn add_comment(&self, place_id: &str, text: &str) -> Result<Comment> {
        let user = self.sessions.require_user()?;
        self.store.add_comment(&user, place_id, text).await
    }

    /// # Errors
    ///
    /// `NotSignedIn`, `EmptyComment`, `CommentNotFound`, `NotCommentAuthor`,
    /// or a store error.
    pub async fn edit_comment(&self, place_id: &str, comment_id: Uuid, text: &str) -> Result<Comment> {
        let user = self.sessions.require_user()?;
        self.store.edit_comment(&user, place_id, comment_id, text).await
    }

    /// # Errors
    ///
    /// `NotSignedIn`, `CommentNotFound`, `NotCommentAuthor`, or a store error.
    pub async fn delete_comment(&self, place_id: &str, comment_id: Uuid) -> Result<()> {
        let user = self.sessions.require_user()?;
        self.store.delete_comment(&user, place_id, comment_id).await
    }

    /// # Errors
    ///
    /// Returns a store error.
    pub async fn comments(&self, place_id: &str) -> Result<Vec<Comment>> {
        self.store.comments(place_id).await
    }

    /// Liked places and written comments of the signed-in user.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` or a store error.
    pub async fn activity(&self) -> Result<ProfileActivity> {
        let user = self.sessions.require_user()?;
        let liked_places = self.store.liked_by_user(&user.uid).await?;
        let comments = self.store.comments_by_user(&user.uid).await?;
        Ok(ProfileActivity {
            user,
            liked_places,
            comments,
        })
    }
}
