//! SeaORM entities.

pub mod area;
pub mod forum;
pub mod message;
pub mod preference;
pub mod topic;
pub mod user;
