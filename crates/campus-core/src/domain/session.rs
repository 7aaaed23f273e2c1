use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// An authenticated session, looked up by its opaque id on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub user_eid: String,
    pub super_user: bool,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Open a fresh session for a user with a random id.
    pub fn for_user(user: &User) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.to_string(),
            user_eid: user.eid.clone(),
            super_user: user.super_user,
            started_at: Utc::now(),
        }
    }
}
