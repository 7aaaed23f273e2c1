//! # Campus Core
//!
//! The domain layer of the campus forums and time service.
//! Entities, ports, and the services orchestrating them. No infrastructure
//! dependencies live here.

pub mod domain;
pub mod error;
pub mod forums;
pub mod ports;
pub mod time;

pub use error::DomainError;
pub use forums::{ForumError, ForumService};
pub use time::UserTimeService;
