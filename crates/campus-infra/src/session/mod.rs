//! Session management over the cache port.

mod cache;

pub use cache::CacheSessionManager;
