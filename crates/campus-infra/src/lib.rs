//! # Campus Infrastructure
//!
//! Concrete implementations of the ports defined in `campus-core`.
//! In-memory adapters are always available; external services sit behind
//! feature flags.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - Argon2 password hashing
//! - `redis` - Redis-backed cache (and therefore sessions)

pub mod cache;
#[cfg(feature = "postgres")]
pub mod database;
pub mod directory;
pub mod forums;
pub mod preferences;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use directory::{DirectoryFile, InMemorySiteService, InMemoryUserRepository};
pub use forums::InMemoryForumRepository;
pub use preferences::InMemoryPreferencesStore;
pub use session::CacheSessionManager;

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresForumRepository, PostgresPreferencesStore,
    PostgresUserRepository,
};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
