//! In-memory community store for tests and single-process use.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::CommunityError;
use crate::identity::UserProfile;
use crate::store::{CommunityStore, LikesMap, Result};
use crate::types::{Comment, LikeSummary};

/// Data is lost when the store is dropped.
pub struct MemoryStore {
    likes: RwLock<LikesMap>,
    comments: RwLock<HashMap<String, Vec<Comment>>>,
    likes_tx: watch::Sender<LikesMap>,
    comment_txs: Mutex<HashMap<String, watch::Sender<Vec<Comment>>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> CommunityError {
    CommunityError::Storage("lock poisoned".to_string())
}

fn normalize_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CommunityError::EmptyComment);
    }
    Ok(trimmed.to_string())
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let (likes_tx, _) = watch::channel(HashMap::new());
        Self {
            likes: RwLock::new(HashMap::new()),
            comments: RwLock::new(HashMap::new()),
            likes_tx,
            comment_txs: Mutex::new(HashMap::new()),
        }
    }

    /// Number of places with at least one comment.
    #[must_use]
    pub fn commented_place_count(&self) -> usize {
        self.comments.read().map_or(0, |c| c.len())
    }

    fn publish_comments(&self, place_id: &str, current: &[Comment]) {
        if let Ok(txs) = self.comment_txs.lock() {
            if let Some(tx) = txs.get(place_id) {
                tx.send_replace(current.to_vec());
            }
        }
    }

    /// Applies `change` to the comment `comment_id` after checking that
    /// `user` wrote it. Returns the place's comments after the change.
    fn modify_own_comment<F, T>(
        &self,
        user: &UserProfile,
        place_id: &str,
        comment_id: Uuid,
        change: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut Vec<Comment>, usize) -> T,
    {
        let mut comments = self.comments.write().map_err(poisoned)?;
        let not_found = || CommunityError::CommentNotFound {
            place_id: place_id.to_string(),
            comment_id,
        };
        let list = comments.get_mut(place_id).ok_or_else(not_found)?;
        let index = list
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(not_found)?;
        if list[index].author_uid != user.uid {
            return Err(CommunityError::NotCommentAuthor(comment_id));
        }

        let out = change(list, index);
        let snapshot = list.clone();
        if list.is_empty() {
            comments.remove(place_id);
        }
        drop(comments);
        self.publish_comments(place_id, &snapshot);
        Ok(out)
    }
}

#[async_trait]
impl CommunityStore for MemoryStore {
    async fn toggle_like(&self, user: &UserProfile, place_id: &str) -> Result<LikeSummary> {
        let mut likes = self.likes.write().map_err(poisoned)?;
        let entry = likes.entry(place_id.to_string()).or_default();
        if let Some(pos) = entry.users.iter().position(|u| *u == user.uid) {
            entry.users.remove(pos);
            tracing::debug!(place_id, uid = %user.uid, "like removed");
        } else {
            entry.users.push(user.uid.clone());
            tracing::debug!(place_id, uid = %user.uid, "like added");
        }
        entry.count = entry.users.len();
        let summary = entry.clone();
        if summary.count == 0 {
            likes.remove(place_id);
        }
        self.likes_tx.send_replace(likes.clone());
        Ok(summary)
    }

    async fn like_summary(&self, place_id: &str) -> Result<LikeSummary> {
        let likes = self.likes.read().map_err(poisoned)?;
        Ok(likes.get(place_id).cloned().unwrap_or_default())
    }

    fn subscribe_likes(&self) -> watch::Receiver<LikesMap> {
        self.likes_tx.subscribe()
    }

    async fn add_comment(&self, user: &UserProfile, place_id: &str, text: &str) -> Result<Comment> {
        let text = normalize_text(text)?;
        let comment = Comment {
            id: Uuid::new_v4(),
            place_id: place_id.to_string(),
            author_uid: user.uid.clone(),
            author_name: user.author_name().to_string(),
            text,
            created_at: Utc::now(),
            edited_at: None,
        };

        let snapshot = {
            let mut comments = self.comments.write().map_err(poisoned)?;
            let list = comments.entry(place_id.to_string()).or_default();
            list.push(comment.clone());
            list.clone()
        };
        tracing::debug!(place_id, comment_id = %comment.id, "comment added");
        self.publish_comments(place_id, &snapshot);
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        user: &UserProfile,
        place_id: &str,
        comment_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        let text = normalize_text(text)?;
        self.modify_own_comment(user, place_id, comment_id, |list, index| {
            let comment = &mut list[index];
            comment.text = text;
            comment.author_name = user.author_name().to_string();
            comment.edited_at = Some(Utc::now());
            comment.clone()
        })
    }

    async fn delete_comment(&self, user: &UserProfile, place_id: &str, comment_id: Uuid) -> Result<()> {
        self.modify_own_comment(user, place_id, comment_id, |list, index| {
            list.remove(index);
        })?;
        tracing::debug!(place_id, %comment_id, "comment deleted");
        Ok(())
    }

    async fn comments(&self, place_id: &str) -> Result<Vec<Comment>> {
        let comments = self.comments.read().map_err(poisoned)?;
        Ok(comments.get(place_id).cloned().unwrap_or_default())
    }

    fn subscribe_comments(&self, place_id: &str) -> watch::Receiver<Vec<Comment>> {
        let current = self
            .comments
            .read()
            .ok()
            .and_then(|c| c.get(place_id).cloned())
            .unwrap_or_default();
        match self.comment_txs.lock() {
            Ok(mut txs) => txs
                .entry(place_id.to_string())
                .or_insert_with(|| watch::channel(current).0)
                .subscribe(),
            // Nothing can be published through a poisoned registry; hand out
            // a receiver that only ever sees the current list.
            Err(_) => watch::channel(current).1,
        }
    }

    async fn liked_by_user(&self, uid: &str) -> Result<Vec<String>> {
        let likes = self.likes.read().map_err(poisoned)?;
        let mut places: Vec<String> = likes
            .iter()
            .filter(|(_, summary)| summary.liked_by(uid))
            .map(|(place_id, _)| place_id.clone())
            .collect();
        places.sort();
        Ok(places)
    }

    async fn comments_by_user(&self, uid: &str) -> Result<Vec<Comment>> {
        let comments = self.comments.read().map_err(poisoned)?;
        let mut mine: Vec<Comment> = comments
            .values()
            .flatten()
            .filter(|c| c.author_uid == uid)
            .cloned()
            .collect();
        mine.sort_by_key(|c| c.created_at);
        Ok(mine)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
