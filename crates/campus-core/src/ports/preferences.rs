//! User preferences port.

use async_trait::async_trait;

use crate::error::RepoError;

/// String properties stored per user, grouped by application id.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Read one property. `None` when the user never set it.
    async fn get_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
    ) -> Result<Option<String>, RepoError>;

    /// Write one property; `None` removes it.
    async fn set_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), RepoError>;
}
