//! Discussion forum entity.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use campus_core::domain::{DiscussionForum, UNSAVED_ID};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discussion_forums")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub area_id: i64,
    /// Copied from the area so listings need no join.
    pub context_id: String,
    pub title: String,
    pub created_by: String,
    pub draft: bool,
    pub moderated: bool,
    pub post_first: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::area::Entity",
        from = "Column::AreaId",
        to = "super::area::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Area,
    #[sea_orm(has_many = "super::topic::Entity")]
    Topic,
}

impl Related<super::area::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Area.def()
    }
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DiscussionForum {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            area_id: model.area_id,
            context_id: model.context_id,
            title: model.title,
            created_by: model.created_by,
            draft: model.draft,
            moderated: model.moderated,
            post_first: model.post_first,
            created_at: model.created_at.into(),
            topics: Vec::new(),
        }
    }
}

/// Topics are stored in their own table and are not written here.
impl From<DiscussionForum> for ActiveModel {
    fn from(forum: DiscussionForum) -> Self {
        Self {
            id: if forum.id == UNSAVED_ID {
                NotSet
            } else {
                Set(forum.id)
            },
            area_id: Set(forum.area_id),
            context_id: Set(forum.context_id),
            title: Set(forum.title),
            created_by: Set(forum.created_by),
            draft: Set(forum.draft),
            moderated: Set(forum.moderated),
            post_first: Set(forum.post_first),
            created_at: Set(forum.created_at.into()),
        }
    }
}
