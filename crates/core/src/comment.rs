//! Comment records as stored by the comment model.

use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, SheetId, ThreadId, UnitId};

/// One comment in a thread.
///
/// A root comment has `parent_id == None`; replies share the root's
/// `thread_id` and point at it through `parent_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: CommentId,
    pub thread_id: ThreadId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    /// Anchor cell in A1 notation.
    pub anchor: String,
    pub text: String,
    pub author: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    #[serde(default)]
    pub resolved: bool,
}

impl CommentRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Timestamp in the format comment records carry.
    pub fn now_timestamp() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}
