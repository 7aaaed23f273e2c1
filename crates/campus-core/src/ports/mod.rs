//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod preferences;
mod repository;
mod site;

pub use auth::{AuthError, PasswordService, SessionManager};
pub use cache::{Cache, CacheError, namespaced_key};
pub use preferences::PreferencesStore;
pub use repository::{BaseRepository, ForumRepository, UserRepository};
pub use site::SiteService;
