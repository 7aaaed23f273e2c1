//! Forum storage.

mod memory;

pub use memory::InMemoryForumRepository;
