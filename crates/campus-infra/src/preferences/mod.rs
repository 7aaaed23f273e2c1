//! User preference stores.

mod memory;

pub use memory::InMemoryPreferencesStore;
