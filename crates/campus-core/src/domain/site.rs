use serde::{Deserialize, Serialize};

/// Common id of the discussion forums tool.
pub const FORUMS_TOOL_ID: &str = "sakai.forums";

/// Permission function required to administer a site.
pub const SITE_UPDATE_FUNCTION: &str = "site.upd";

/// Site-level binding of a named tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfiguration {
    /// Placement id, unique within the site.
    pub id: String,
    pub tool_id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMember {
    pub user_eid: String,
    pub role: String,
}

/// A course or project site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tools: Vec<ToolConfiguration>,
    #[serde(default)]
    pub members: Vec<SiteMember>,
}

impl Site {
    pub fn reference(&self) -> String {
        format!("/site/{}", self.id)
    }

    /// First tool placement bound to `tool_id`.
    pub fn tool_for_common_id(&self, tool_id: &str) -> Option<&ToolConfiguration> {
        self.tools.iter().find(|t| t.tool_id == tool_id)
    }

    pub fn role_of(&self, user_eid: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.user_eid == user_eid)
            .map(|m| m.role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site {
            id: "chem-101".to_string(),
            title: "Chemistry".to_string(),
            tools: vec![
                ToolConfiguration {
                    id: "p-1".to_string(),
                    tool_id: "sakai.announcements".to_string(),
                    title: "News".to_string(),
                },
                ToolConfiguration {
                    id: "p-2".to_string(),
                    tool_id: FORUMS_TOOL_ID.to_string(),
                    title: "Forums".to_string(),
                },
            ],
            members: vec![SiteMember {
                user_eid: "prof".to_string(),
                role: "maintain".to_string(),
            }],
        }
    }

    #[test]
    fn test_tool_lookup() {
        let site = site();
        assert_eq!(site.tool_for_common_id(FORUMS_TOOL_ID).map(|t| t.id.as_str()), Some("p-2"));
        assert!(site.tool_for_common_id("sakai.gradebook").is_none());
    }

    #[test]
    fn test_reference_and_roles() {
        let site = site();
        assert_eq!(site.reference(), "/site/chem-101");
        assert_eq!(site.role_of("prof"), Some("maintain"));
        assert_eq!(site.role_of("student"), None);
    }
}
