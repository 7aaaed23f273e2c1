use thiserror::Error;

use crate::error::RepoError;
use crate::ports::AuthError;

/// Reply to a successful add-message call.
pub const SUCCESS: &str = "Success";

/// Reply to an add-message call that failed unexpectedly.
pub const FAILURE: &str = "Failure";

/// Forum workflow failures.
#[derive(Debug, Error)]
pub enum ForumError {
    #[error(transparent)]
    Session(#[from] AuthError),

    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Tool sakai.forums not found in site={0}")]
    ToolNotFound(String),

    #[error("No forums found in site={0}")]
    NoForums(String),

    #[error("No topic")]
    NoTopic,

    #[error("Permission denied: {user} may not list forums of site {site}")]
    PermissionDenied { user: String, site: String },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ForumError {
    /// The plain-text status returned to add-message callers.
    ///
    /// Expected outcomes are described; everything else collapses to
    /// [`FAILURE`].
    pub fn status_line(&self) -> String {
        match self {
            ForumError::ToolNotFound(_) | ForumError::NoForums(_) | ForumError::NoTopic => {
                self.to_string()
            }
            _ => FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert_eq!(
            ForumError::ToolNotFound("s1".to_string()).status_line(),
            "Tool sakai.forums not found in site=s1"
        );
        assert_eq!(
            ForumError::NoForums("s1".to_string()).status_line(),
            "No forums found in site=s1"
        );
        assert_eq!(ForumError::NoTopic.status_line(), "No topic");
        assert_eq!(ForumError::SiteNotFound("s1".to_string()).status_line(), FAILURE);
        assert_eq!(
            ForumError::Repo(RepoError::Query("boom".to_string())).status_line(),
            FAILURE
        );
    }
}
