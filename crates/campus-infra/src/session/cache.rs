use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use campus_core::domain::{Session, User};
use campus_core::ports::{AuthError, Cache, SessionManager, namespaced_key};

const SESSION_NAMESPACE: &str = "session";

/// Sessions stored as JSON in a [`Cache`], expiring after a period of
/// inactivity.
///
/// Every successful [`establish`](SessionManager::establish) rewrites the
/// entry, restarting the inactivity timer.
pub struct CacheSessionManager {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CacheSessionManager {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    async fn store(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session).map_err(|e| AuthError::Store(e.to_string()))?;
        self.cache
            .set(&namespaced_key(SESSION_NAMESPACE, &session.id), &json, Some(self.ttl))
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }
}

#[async_trait]
impl SessionManager for CacheSessionManager {
    async fn start(&self, user: &User) -> Result<Session, AuthError> {
        let session = Session::for_user(user);
        self.store(&session).await?;
        tracing::info!(session_id = %session.id, user = %session.user_eid, "Session started");
        Ok(session)
    }

    async fn establish(&self, session_id: &str) -> Result<Session, AuthError> {
        if session_id.trim().is_empty() {
            return Err(AuthError::MissingSession);
        }

        let json = self
            .cache
            .get(&namespaced_key(SESSION_NAMESPACE, session_id))
            .await
            .ok_or(AuthError::SessionNotFound)?;

        let session: Session = serde_json::from_str(&json).map_err(|e| {
            tracing::warn!(session_id = %session_id, error = %e, "Corrupt session entry");
            AuthError::SessionNotFound
        })?;

        self.store(&session).await?;
        Ok(session)
    }

    async fn invalidate(&self, session_id: &str) -> Result<(), AuthError> {
        self.cache
            .delete(&namespaced_key(SESSION_NAMESPACE, session_id))
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;

    fn manager(ttl: Duration) -> (Arc<InMemoryCache>, CacheSessionManager) {
        let cache = Arc::new(InMemoryCache::new());
        let manager = CacheSessionManager::new(cache.clone(), ttl);
        (cache, manager)
    }

    fn user() -> User {
        User::new(
            "maintainer".to_string(),
            "Mae Tainer".to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_start_then_establish() {
        let (_, sessions) = manager(Duration::from_secs(60));
        let started = sessions.start(&user()).await.unwrap();

        let found = sessions.establish(&started.id).await.unwrap();
        assert_eq!(found, started);
        assert_eq!(found.user_eid, "maintainer");
        assert!(!found.super_user);
    }

    #[tokio::test]
    async fn test_unknown_and_empty_ids() {
        let (_, sessions) = manager(Duration::from_secs(60));
        assert!(matches!(
            sessions.establish("nope").await,
            Err(AuthError::SessionNotFound)
        ));
        assert!(matches!(
            sessions.establish("  ").await,
            Err(AuthError::MissingSession)
        ));
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (cache, sessions) = manager(Duration::from_secs(60));
        let started = sessions.start(&user()).await.unwrap();

        sessions.invalidate(&started.id).await.unwrap();

        assert!(!cache.exists(&format!("session:{}", started.id)).await);
        assert!(sessions.establish(&started.id).await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_expire_when_idle() {
        let (_, sessions) = manager(Duration::from_millis(40));
        let started = sessions.start(&user()).await.unwrap();

        std::thread::sleep(Duration::from_millis(50));
        assert!(matches!(
            sessions.establish(&started.id).await,
            Err(AuthError::SessionNotFound)
        ));
    }
}
