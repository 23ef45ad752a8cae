//! Storage contract for likes and comments keyed by `place_id`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::CommunityError;
use crate::identity::UserProfile;
use crate::types::{Comment, LikeSummary};

pub type Result<T> = std::result::Result<T, CommunityError>;

/// Likes across all places, keyed by `place_id`.
pub type LikesMap = HashMap<String, LikeSummary>;

#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Likes the place for `user`, or removes the like if it exists.
    async fn toggle_like(&self, user: &UserProfile, place_id: &str) -> Result<LikeSummary>;

    async fn like_summary(&self, place_id: &str) -> Result<LikeSummary>;

    /// Observes the full likes map; each change replaces the previous value.
    fn subscribe_likes(&self) -> watch::Receiver<LikesMap>;

    /// Adds a comment authored by `user`. Text is trimmed and must not be
    /// empty.
    async fn add_comment(&self, user: &UserProfile, place_id: &str, text: &str) -> Result<Comment>;

    /// Replaces the text of a comment `user` wrote.
    async fn edit_comment(
        &self,
        user: &UserProfile,
        place_id: &str,
        comment_id: Uuid,
        text: &str,
    ) -> Result<Comment>;

    async fn delete_comment(&self, user: &UserProfile, place_id: &str, comment_id: Uuid) -> Result<()>;

    /// Comments on a place in creation order.
    async fn comments(&self, place_id: &str) -> Result<Vec<Comment>>;

    fn subscribe_comments(&self, place_id: &str) -> watch::Receiver<Vec<Comment>>;

    /// Place ids the user currently likes, sorted.
    async fn liked_by_user(&self, uid: &str) -> Result<Vec<String>>;

    /// Every comment the user wrote, oldest first.
    async fn comments_by_user(&self, uid: &str) -> Result<Vec<Comment>>;
}
