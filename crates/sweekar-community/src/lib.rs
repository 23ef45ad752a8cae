//! Community features around discovered resources: signed-in sessions,
//! likes, comments, and per-user activity. Everything is keyed by the
//! places backend's `place_id`.

pub mod community;
pub mod error;
pub mod identity;
pub mod memory;
pub mod store;
pub mod types;

pub use community::{Community, ProfileActivity};
pub use error::CommunityError;
pub use identity::{SessionHub, UserProfile, ANONYMOUS};
pub use memory::MemoryStore;
pub use store::{CommunityStore, LikesMap};
pub use types::{Comment, LikeSummary};
