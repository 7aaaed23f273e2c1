use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use campus_core::domain::{Site, User};
use campus_core::error::RepoError;
use campus_core::ports::{AuthError, BaseRepository, PasswordService, UserRepository};

use super::InMemorySiteService;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read directory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid directory file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Password(#[from] AuthError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A user entry with a clear-text password, hashed on import.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUser {
    pub eid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub password: String,
    #[serde(default)]
    pub super_user: bool,
}

/// Users and sites to preload, as read from JSON:
///
/// ```json
/// {
///   "users": [{ "eid": "admin", "password": "admin", "super_user": true }],
///   "sites": [{ "id": "chem-101", "title": "Chemistry",
///               "tools": [{ "id": "p1", "tool_id": "sakai.forums" }],
///               "members": [{ "user_eid": "prof", "role": "maintain" }] }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub sites: Vec<Site>,
}

impl DirectoryFile {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let directory = Self::parse(&raw)?;
        tracing::info!(
            path = %path.display(),
            users = directory.users.len(),
            sites = directory.sites.len(),
            "Loaded directory file"
        );
        Ok(directory)
    }

    pub fn parse(raw: &str) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Import users (skipping external ids already known) and sites.
    pub async fn seed(
        &self,
        users: &dyn UserRepository,
        sites: &InMemorySiteService,
        passwords: &dyn PasswordService,
    ) -> Result<(), DirectoryError> {
        for entry in &self.users {
            if users.find_by_eid(&entry.eid).await?.is_some() {
                tracing::debug!(eid = %entry.eid, "User already present, skipping");
                continue;
            }
            let user = User::new(
                entry.eid.clone(),
                entry.display_name.clone().unwrap_or_else(|| entry.eid.clone()),
                passwords.hash(&entry.password)?,
            )
            .with_super_user(entry.super_user);
            users.save(user).await?;
        }

        for site in &self.sites {
            sites.put_site(site.clone()).await;
        }

        Ok(())
    }
}
