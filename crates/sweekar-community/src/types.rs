use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Like count and the users behind it for one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSummary {
    pub count: usize,
    /// User ids in the order they liked the place.
    pub users: Vec<String>,
}

impl LikeSummary {
    #[must_use]
    pub fn liked_by(&self, uid: &str) -> bool {
        self.users.iter().any(|u| u == uid)
    }
}

/// A comment on one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub place_id: String,
    pub author_uid: String,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}
