use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};

use campus_core::domain::{Area, DiscussionForum, DiscussionTopic, Message};
use campus_core::error::RepoError;
use campus_core::ports::ForumRepository;

use super::entity::{area, forum, message, topic};
use super::postgres_base::{map_db_err, save_active};

/// Forum tables in PostgreSQL. Ids come from the table sequences, so
/// ordering by id is creation order.
pub struct PostgresForumRepository {
    db: DbConn,
}

impl PostgresForumRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn find_area(&self, context_id: &str, type_id: &str) -> Result<Option<Area>, RepoError> {
        let row = area::Entity::find()
            .filter(area::Column::ContextId.eq(context_id))
            .filter(area::Column::TypeId.eq(type_id))
            .order_by_asc(area::Column::Id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Into::into))
    }

    async fn save_area(&self, area: Area) -> Result<Area, RepoError> {
        save_active::<area::Entity>(&self.db, area.into())
            .await
            .map(Into::into)
    }

    async fn forums_for_context(
        &self,
        context_id: &str,
    ) -> Result<Vec<DiscussionForum>, RepoError> {
        let rows = forum::Entity::find()
            .filter(forum::Column::ContextId.eq(context_id))
            .order_by_asc(forum::Column::Id)
            .find_with_related(topic::Entity)
            .order_by_asc(topic::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(forum, topics)| DiscussionForum {
                topics: topics.into_iter().map(Into::into).collect(),
                ..DiscussionForum::from(forum)
            })
            .collect())
    }

    async fn save_forum(&self, mut forum: DiscussionForum) -> Result<DiscussionForum, RepoError> {
        let topics = std::mem::take(&mut forum.topics);
        let saved: DiscussionForum = save_active::<forum::Entity>(&self.db, forum.into())
            .await?
            .into();
        Ok(DiscussionForum { topics, ..saved })
    }

    async fn save_topic(&self, topic: DiscussionTopic) -> Result<DiscussionTopic, RepoError> {
        save_active::<topic::Entity>(&self.db, topic.into())
            .await
            .map(Into::into)
    }

    async fn topic_with_messages(
        &self,
        topic_id: i64,
    ) -> Result<Option<(DiscussionTopic, Vec<Message>)>, RepoError> {
        let Some(topic) = topic::Entity::find_by_id(topic_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let messages = message::Entity::find()
            .filter(message::Column::TopicId.eq(topic_id))
            .order_by_asc(message::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Some((
            topic.into(),
            messages.into_iter().map(Into::into).collect(),
        )))
    }

    async fn save_message(&self, message: Message) -> Result<Message, RepoError> {
        save_active::<message::Entity>(&self.db, message.into())
            .await
            .map(Into::into)
    }
}
