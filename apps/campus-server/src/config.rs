//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use campus_core::time::TimeZoneConfig;
#[cfg(feature = "postgres")]
use campus_infra::DatabaseConfig;

const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "redis")]
    pub redis_url: Option<String>,
    pub timezone: TimeZoneConfig,
    /// Idle time after which a session expires.
    pub session_ttl: Duration,
    /// JSON file of users and sites loaded at startup.
    pub directory_file: Option<PathBuf>,
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database: non_empty("DATABASE_URL").map(|url| DatabaseConfig {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(2),
            }),
            #[cfg(feature = "redis")]
            redis_url: non_empty("REDIS_URL"),
            timezone: TimeZoneConfig {
                default_timezone: non_empty("DEFAULT_TIMEZONE"),
                cache_ttl: parsed("TIMEZONE_CACHE_TTL_SECS").map(Duration::from_secs),
            },
            session_ttl: Duration::from_secs(
                parsed("SESSION_TTL_SECS").unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),
            directory_file: non_empty("DIRECTORY_FILE").map(PathBuf::from),
        }
    }
}
