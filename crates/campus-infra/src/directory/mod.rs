//! User and site directories held in memory, optionally seeded from a JSON
//! file.

mod file;
mod sites;
mod users;

pub use file::{DirectoryError, DirectoryFile, DirectoryUser};
pub use sites::InMemorySiteService;
pub use users::InMemoryUserRepository;
