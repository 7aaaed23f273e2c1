//! Site directory and permission port.

use async_trait::async_trait;

use crate::domain::Site;
use crate::error::RepoError;

/// Lookup of sites and of the permissions users hold in them.
#[async_trait]
pub trait SiteService: Send + Sync {
    async fn get_site(&self, site_id: &str) -> Result<Option<Site>, RepoError>;

    /// Whether `user_eid` holds the permission `function` in `site`.
    async fn unlock(&self, user_eid: &str, function: &str, site: &Site) -> bool;
}
