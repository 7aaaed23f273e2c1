use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};

use campus_core::error::RepoError;
use campus_core::ports::PreferencesStore;

use super::entity::preference::{self, Column, Entity as PreferenceEntity};
use super::postgres_base::map_db_err;

/// Preference properties in the `user_preferences` table.
pub struct PostgresPreferencesStore {
    db: DbConn,
}

impl PostgresPreferencesStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferencesStore for PostgresPreferencesStore {
    async fn get_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
    ) -> Result<Option<String>, RepoError> {
        let row = PreferenceEntity::find_by_id((
            user_id.to_string(),
            application.to_string(),
            key.to_string(),
        ))
        .one(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.value))
    }

    async fn set_property(
        &self,
        user_id: &str,
        application: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), RepoError> {
        let Some(value) = value else {
            PreferenceEntity::delete_many()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::Application.eq(application))
                .filter(Column::Key.eq(key))
                .exec(&self.db)
                .await
                .map_err(map_db_err)?;
            return Ok(());
        };

        let row = preference::ActiveModel {
            user_id: Set(user_id.to_string()),
            application: Set(application.to_string()),
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };

        PreferenceEntity::insert(row)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::Application, Column::Key])
                    .update_column(Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
