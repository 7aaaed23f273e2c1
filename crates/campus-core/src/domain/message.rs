use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

/// A single post within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub draft: bool,
    pub deleted: bool,
    pub approved: bool,
    /// The message this one replies to, if any.
    pub in_reply_to: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// An approved, published message ready to be saved.
    pub fn new(
        topic_id: i64,
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            topic_id,
            title: title.into(),
            body: body.into(),
            author: author.into(),
            draft: false,
            deleted: false,
            approved: true,
            in_reply_to: None,
            created_at: Utc::now(),
        }
    }

    pub fn replying_to(mut self, parent: &Message) -> Self {
        self.in_reply_to = Some(parent.id);
        self
    }
}
