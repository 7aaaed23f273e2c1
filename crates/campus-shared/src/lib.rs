//! # Campus Shared
//!
//! Wire types shared between the server and its clients: JSON DTOs, RFC 7807
//! problem details and the forum-list XML document.

pub mod dto;
pub mod response;
pub mod xml;

pub use response::{ApiResponse, ErrorResponse};
pub use xml::{ERROR_XML, ForumListDocument, XmlError};
