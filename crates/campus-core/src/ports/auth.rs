//! Session and credential ports.

use async_trait::async_trait;

use crate::domain::{Session, User};

/// Session manager - opens and looks up authenticated sessions.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Open a new session for an authenticated user.
    async fn start(&self, user: &User) -> Result<Session, AuthError>;

    /// Look up an active session by id, refreshing its inactivity timer.
    async fn establish(&self, session_id: &str) -> Result<Session, AuthError>;

    /// End a session. Unknown ids are not an error.
    async fn invalidate(&self, session_id: &str) -> Result<(), AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Missing session id")]
    MissingSession,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Session store error: {0}")]
    Store(String),
}
