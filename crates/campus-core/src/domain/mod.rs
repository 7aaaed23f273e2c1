//! Domain entities - the core business objects.

mod area;
mod forum;
mod message;
mod session;
mod site;
mod user;

pub use area::{Area, DISCUSSION_FORUM_TYPE};
pub use forum::{DiscussionForum, DiscussionTopic};
pub use message::Message;
pub use session::Session;
pub use site::{FORUMS_TOOL_ID, SITE_UPDATE_FUNCTION, Site, SiteMember, ToolConfiguration};
pub use user::User;

/// Identifier carried by entities that have not been persisted yet.
///
/// Repositories assign increasing identifiers on first save, so identifier
/// order is creation order.
pub const UNSAVED_ID: i64 = 0;
