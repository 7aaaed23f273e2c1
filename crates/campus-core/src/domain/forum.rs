use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

/// Named collection of topics within an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionForum {
    pub id: i64,
    pub area_id: i64,
    pub context_id: String,
    pub title: String,
    pub created_by: String,
    pub draft: bool,
    pub moderated: bool,
    pub post_first: bool,
    pub created_at: DateTime<Utc>,
    /// Topics in creation order. Filled in by the repository when listing.
    #[serde(default)]
    pub topics: Vec<DiscussionTopic>,
}

impl DiscussionForum {
    /// A published, unmoderated forum with no topics yet.
    pub fn new(
        area_id: i64,
        context_id: impl Into<String>,
        title: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            area_id,
            context_id: context_id.into(),
            title: title.into(),
            created_by: created_by.into(),
            draft: false,
            moderated: false,
            post_first: false,
            created_at: Utc::now(),
            topics: Vec::new(),
        }
    }
}

/// Thread container within a forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTopic {
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    pub created_by: String,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
}

impl DiscussionTopic {
    pub fn new(forum_id: i64, title: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            forum_id,
            title: title.into(),
            created_by: created_by.into(),
            draft: false,
            created_at: Utc::now(),
        }
    }
}
