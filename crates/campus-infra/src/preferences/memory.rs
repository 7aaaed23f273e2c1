use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::error::RepoError;
use campus_core::ports::PreferencesStore;

type PropertyKey = (String, String, String);

/// Preference properties keyed by (user, application, key).
#[derive(Default)]
pub struct InMemoryPreferencesStore {
    properties: RwLock<HashMap<PropertyKey, String>>,
}

impl InMemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn property_key(user_id: &str, application: &str, key: &str) -> PropertyKey {
    (user_id.to_string(), application.to_string(), key.to_string())
}

#[async_trait]
impl PreferencesStore for InMemoryPreferencesStore {
    async fn get_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
    ) -> Result<Option<String>, RepoError> {
        Ok(self
            .properties
            .read()
            .await
            .get(&property_key(user_id, application, key))
            .cloned())
    }

    async fn set_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), RepoError> {
        let mut properties = self.properties.write().await;
        let property = property_key(user_id, application, key);
        match value {
            Some(value) => {
                properties.insert(property, value.to_string());
            }
            None => {
                properties.remove(&property);
            }
        }
        Ok(())
    }
}
