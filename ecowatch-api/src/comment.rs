use std::collections::HashSet;

use uuid::Uuid;

use crate::{Time, UserId, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// Never changes after creation.
    pub author_id: UserId,

    pub content: String,
    pub created_at: Time,
    pub updated_at: Time,

    /// True once the content has been modified post-creation. Only the
    /// server ever sets this.
    pub edited: bool,

    pub is_staff_response: bool,

    /// Hidden comments are only shown to staff.
    pub is_hidden: bool,

    /// Users who marked this comment helpful. The author never appears here.
    pub helpful_voters: HashSet<UserId>,

    /// Replies in insertion order, newest last. Replies never nest: every
    /// element of this list has an empty `replies` of its own.
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Whether `user` may vote on this comment. Own comments are not votable.
    pub fn can_vote(&self, user: UserId) -> bool {
        self.author_id != user
    }

    pub fn helpful_count(&self) -> usize {
        self.helpful_voters.len()
    }

    pub fn has_voted(&self, user: UserId) -> bool {
        self.helpful_voters.contains(&user)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Hide,
    Show,
}
