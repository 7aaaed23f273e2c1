use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::domain::{SITE_UPDATE_FUNCTION, Site};
use campus_core::error::RepoError;
use campus_core::ports::SiteService;

/// Permission to enter a site.
pub const SITE_VISIT_FUNCTION: &str = "site.visit";

/// Functions granted by each role.
const ROLE_GRANTS: &[(&str, &[&str])] = &[
    ("maintain", &[SITE_UPDATE_FUNCTION, SITE_VISIT_FUNCTION]),
    ("access", &[SITE_VISIT_FUNCTION]),
];

fn role_grants(role: &str, function: &str) -> bool {
    ROLE_GRANTS
        .iter()
        .any(|(r, functions)| *r == role && functions.contains(&function))
}

/// Sites held in memory; permissions derive from member roles.
#[derive(Default)]
pub struct InMemorySiteService {
    sites: RwLock<HashMap<String, Site>>,
}

impl InMemorySiteService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a site.
    pub async fn put_site(&self, site: Site) {
        tracing::debug!(site = %site.id, tools = site.tools.len(), "Registered site");
        self.sites.write().await.insert(site.id.clone(), site);
    }
}

#[async_trait]
impl SiteService for InMemorySiteService {
    async fn get_site(&self, site_id: &str) -> Result<Option<Site>, RepoError> {
        Ok(self.sites.read().await.get(site_id).cloned())
    }

    async fn unlock(&self, user_eid: &str, function: &str, site: &Site) -> bool {
        let allowed = site
            .role_of(user_eid)
            .is_some_and(|role| role_grants(role, function));
        tracing::trace!(user = %user_eid, function, site = %site.reference(), allowed, "unlock");
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::domain::{FORUMS_TOOL_ID, SiteMember, ToolConfiguration};

    fn site() -> Site {
        Site {
            id: "chem-101".to_string(),
            title: "Chemistry".to_string(),
            tools: vec![ToolConfiguration {
                id: "placement-1".to_string(),
                tool_id: FORUMS_TOOL_ID.to_string(),
                title: "Forums".to_string(),
            }],
            members: vec![
                SiteMember {
                    user_eid: "prof".to_string(),
                    role: "maintain".to_string(),
                },
                SiteMember {
                    user_eid: "student".to_string(),
                    role: "access".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_get_site() {
        let sites = InMemorySiteService::new();
        sites.put_site(site()).await;

        assert!(sites.get_site("chem-101").await.unwrap().is_some());
        assert!(sites.get_site("bio-200").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unlock_by_role() {
        let sites = InMemorySiteService::new();
        let site = site();

        assert!(sites.unlock("prof", SITE_UPDATE_FUNCTION, &site).await);
        assert!(!sites.unlock("student", SITE_UPDATE_FUNCTION, &site).await);
        assert!(sites.unlock("student", SITE_VISIT_FUNCTION, &site).await);
        assert!(!sites.unlock("stranger", SITE_VISIT_FUNCTION, &site).await);
    }
}
