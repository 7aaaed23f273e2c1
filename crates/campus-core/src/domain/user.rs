use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents an account that can log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// External id used to log in and to name site members.
    pub eid: String,
    pub display_name: String,
    pub password_hash: String,
    pub super_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(eid: String, display_name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            eid,
            display_name,
            password_hash,
            super_user: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_super_user(mut self, super_user: bool) -> Self {
        self.super_user = super_user;
        self
    }
}
