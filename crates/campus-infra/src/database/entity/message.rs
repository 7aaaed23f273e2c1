//! Forum message entity.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use campus_core::domain::{Message, UNSAVED_ID};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author: String,
    pub draft: bool,
    pub deleted: bool,
    pub approved: bool,
    pub in_reply_to: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topic::Entity",
        from = "Column::TopicId",
        to = "super::topic::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Topic,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Message {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            topic_id: model.topic_id,
            title: model.title,
            body: model.body,
            author: model.author,
            draft: model.draft,
            deleted: model.deleted,
            approved: model.approved,
            in_reply_to: model.in_reply_to,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Message> for ActiveModel {
    fn from(message: Message) -> Self {
        Self {
            id: if message.id == UNSAVED_ID {
                NotSet
            } else {
                Set(message.id)
            },
            topic_id: Set(message.topic_id),
            title: Set(message.title),
            body: Set(message.body),
            author: Set(message.author),
            draft: Set(message.draft),
            deleted: Set(message.deleted),
            approved: Set(message.approved),
            in_reply_to: Set(message.in_reply_to),
            created_at: Set(message.created_at.into()),
        }
    }
}
