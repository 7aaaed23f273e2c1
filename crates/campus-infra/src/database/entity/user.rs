//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub eid: String,
    pub display_name: String,
    pub password_hash: String,
    pub super_user: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for campus_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            eid: model.eid,
            display_name: model.display_name,
            password_hash: model.password_hash,
            super_user: model.super_user,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<campus_core::domain::User> for ActiveModel {
    fn from(user: campus_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            eid: Set(user.eid),
            display_name: Set(user.display_name),
            password_hash: Set(user.password_hash),
            super_user: Set(user.super_user),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
