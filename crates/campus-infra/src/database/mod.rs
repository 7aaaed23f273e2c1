//! PostgreSQL persistence via SeaORM.

mod connections;
mod forums;
mod postgres_base;
mod preferences;
mod users;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use forums::PostgresForumRepository;
pub use postgres_base::PostgresBaseRepository;
pub use preferences::PostgresPreferencesStore;
pub use users::PostgresUserRepository;
