use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

/// Type id of the area that holds discussion forums.
pub const DISCUSSION_FORUM_TYPE: &str = "discussion-forum";

/// Per-site container for forums, keyed by (context, type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub context_id: String,
    pub type_id: String,
    pub name: String,
    pub enabled: bool,
    pub hidden: bool,
    pub locked: bool,
    pub moderated: bool,
    pub post_first: bool,
    pub auto_mark_threads_read: bool,
    pub send_email_out: bool,
    pub availability_restricted: bool,
    pub created_at: DateTime<Utc>,
}

impl Area {
    /// The area created lazily the first time a site gets a forum.
    pub fn discussion_defaults(context_id: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            context_id: context_id.into(),
            type_id: DISCUSSION_FORUM_TYPE.to_string(),
            name: "AREA 51".to_string(),
            enabled: true,
            hidden: true,
            locked: false,
            moderated: false,
            post_first: false,
            auto_mark_threads_read: false,
            send_email_out: true,
            availability_restricted: false,
            created_at: Utc::now(),
        }
    }
}
