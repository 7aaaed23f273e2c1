//! Credential verification.

mod password;

pub use password::Argon2PasswordService;
