//! Discussion topic entity.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use campus_core::domain::{DiscussionTopic, UNSAVED_ID};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discussion_topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    pub created_by: String,
    pub draft: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum::Entity",
        from = "Column::ForumId",
        to = "super::forum::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Forum,
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<super::forum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forum.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DiscussionTopic {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            forum_id: model.forum_id,
            title: model.title,
            created_by: model.created_by,
            draft: model.draft,
            created_at: model.created_at.into(),
        }
    }
}

impl From<DiscussionTopic> for ActiveModel {
    fn from(topic: DiscussionTopic) -> Self {
        Self {
            id: if topic.id == UNSAVED_ID {
                NotSet
            } else {
                Set(topic.id)
            },
            forum_id: Set(topic.forum_id),
            title: Set(topic.title),
            created_by: Set(topic.created_by),
            draft: Set(topic.draft),
            created_at: Set(topic.created_at.into()),
        }
    }
}
