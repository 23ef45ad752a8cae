use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommunityError {
    #[error("sign in required")]
    NotSignedIn,

    #[error("comment {comment_id} not found on place {place_id}")]
    CommentNotFound { place_id: String, comment_id: Uuid },

    #[error("comment {0} belongs to another user")]
    NotCommentAuthor(Uuid),

    #[error("comment text is empty")]
    EmptyComment,

    /// The backing store cannot be read or written.
    #[error("community store unavailable: {0}")]
    Storage(String),
}
