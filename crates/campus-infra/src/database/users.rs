use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use campus_core::domain::User;
use campus_core::error::RepoError;
use campus_core::ports::UserRepository;

use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_eid(&self, eid: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(eid = %eid, "Finding user by eid");

        let result = UserEntity::find()
            .filter(user::Column::Eid.eq(eid))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
