//! Forum area entity: one per site and area type.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use campus_core::domain::{Area, UNSAVED_ID};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_areas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub context_id: String,
    pub type_id: String,
    pub name: String,
    pub enabled: bool,
    pub hidden: bool,
    pub locked: bool,
    pub moderated: bool,
    pub post_first: bool,
    pub auto_mark_threads_read: bool,
    pub send_email_out: bool,
    pub availability_restricted: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::forum::Entity")]
    Forum,
}

impl Related<super::forum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forum.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Area {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            context_id: model.context_id,
            type_id: model.type_id,
            name: model.name,
            enabled: model.enabled,
            hidden: model.hidden,
            locked: model.locked,
            moderated: model.moderated,
            post_first: model.post_first,
            auto_mark_threads_read: model.auto_mark_threads_read,
            send_email_out: model.send_email_out,
            availability_restricted: model.availability_restricted,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Area> for ActiveModel {
    fn from(area: Area) -> Self {
        Self {
            id: if area.id == UNSAVED_ID {
                NotSet
            } else {
                Set(area.id)
            },
            context_id: Set(area.context_id),
            type_id: Set(area.type_id),
            name: Set(area.name),
            enabled: Set(area.enabled),
            hidden: Set(area.hidden),
            locked: Set(area.locked),
            moderated: Set(area.moderated),
            post_first: Set(area.post_first),
            auto_mark_threads_read: Set(area.auto_mark_threads_read),
            send_email_out: Set(area.send_email_out),
            availability_restricted: Set(area.availability_restricted),
            created_at: Set(area.created_at.into()),
        }
    }
}
