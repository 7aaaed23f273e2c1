//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use campus_core::ports::{
    Cache, ForumRepository, PasswordService, PreferencesStore, SessionManager, UserRepository,
};
use campus_core::time::TimeZoneConfig;
use campus_core::{ForumService, UserTimeService};
use campus_infra::{
    Argon2PasswordService, CacheSessionManager, DirectoryFile, InMemoryCache,
    InMemoryForumRepository, InMemoryPreferencesStore, InMemorySiteService,
    InMemoryUserRepository,
};

use crate::config::AppConfig;

/// Storage adapters the services are built on.
pub struct Adapters {
    pub cache: Arc<dyn Cache>,
    pub users: Arc<dyn UserRepository>,
    pub preferences: Arc<dyn PreferencesStore>,
    pub forums: Arc<dyn ForumRepository>,
}

impl Adapters {
    pub fn in_memory() -> Self {
        Self {
            cache: Arc::new(InMemoryCache::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            preferences: Arc::new(InMemoryPreferencesStore::new()),
            forums: Arc::new(InMemoryForumRepository::new()),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionManager>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sites: Arc<InMemorySiteService>,
    pub forums: Arc<ForumService>,
    pub time: Arc<UserTimeService>,
}

impl AppState {
    /// Build the state from configuration, falling back to in-memory
    /// adapters for any backend that is not configured or not reachable.
    pub async fn new(config: &AppConfig) -> Self {
        #[allow(unused_mut)]
        let mut adapters = Adapters::in_memory();

        #[cfg(feature = "redis")]
        if let Some(url) = &config.redis_url {
            let redis_config = campus_infra::RedisConfig {
                url: url.clone(),
                ..campus_infra::RedisConfig::from_env()
            };
            match campus_infra::RedisCache::new(redis_config).await {
                Ok(cache) => adapters.cache = Arc::new(cache),
                Err(e) => {
                    tracing::error!(error = %e, "Redis unavailable, using in-memory cache");
                }
            }
        }

        #[cfg(feature = "postgres")]
        match &config.database {
            Some(db_config) => match campus_infra::DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let db = connections.main;
                    adapters.users =
                        Arc::new(campus_infra::PostgresUserRepository::new(db.clone()));
                    adapters.preferences =
                        Arc::new(campus_infra::PostgresPreferencesStore::new(db.clone()));
                    adapters.forums = Arc::new(campus_infra::PostgresForumRepository::new(db));
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to connect to database, using in-memory storage"
                    );
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        let state = Self::with_adapters(adapters, config.timezone.clone(), config.session_ttl);

        if let Some(path) = &config.directory_file {
            let seeded = match DirectoryFile::load(path).await {
                Ok(directory) => {
                    directory
                        .seed(state.users.as_ref(), &state.sites, state.passwords.as_ref())
                        .await
                }
                Err(e) => Err(e),
            };
            if let Err(e) = seeded {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load directory file"
                );
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Wire the services over the given adapters.
    pub fn with_adapters(
        adapters: Adapters,
        timezone: TimeZoneConfig,
        session_ttl: Duration,
    ) -> Self {
        let sessions: Arc<dyn SessionManager> =
            Arc::new(CacheSessionManager::new(adapters.cache.clone(), session_ttl));
        let sites = Arc::new(InMemorySiteService::new());

        let forums = ForumService::new(sessions.clone(), sites.clone(), adapters.forums);
        let time = UserTimeService::new(adapters.cache, adapters.preferences, timezone);

        Self {
            sessions,
            users: adapters.users,
            passwords: Arc::new(Argon2PasswordService::new()),
            sites,
            forums: Arc::new(forums),
            time: Arc::new(time),
        }
    }
}
