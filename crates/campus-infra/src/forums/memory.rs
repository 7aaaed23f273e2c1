use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::domain::{Area, DiscussionForum, DiscussionTopic, Message, UNSAVED_ID};
use campus_core::error::RepoError;
use campus_core::ports::ForumRepository;

#[derive(Default)]
struct Tables {
    areas: Vec<Area>,
    /// Stored without topics; they are joined on read.
    forums: Vec<DiscussionForum>,
    topics: Vec<DiscussionTopic>,
    messages: Vec<Message>,
}

/// Rows that carry an id assigned on insert.
trait Row {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_row {
    ($($ty:ty),*) => {
        $(impl Row for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

impl_row!(Area, DiscussionForum, DiscussionTopic, Message);

/// Forum tables in memory.
///
/// One sequence numbers every row, so ids increase in creation order across
/// all tables. Rows are kept in insertion order.
pub struct InMemoryForumRepository {
    tables: RwLock<Tables>,
    next_id: AtomicI64,
}

impl InMemoryForumRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_id: AtomicI64::new(1),
        }
    }

    fn upsert<T: Row + Clone>(&self, rows: &mut Vec<T>, mut row: T) -> Result<T, RepoError> {
        if row.id() == UNSAVED_ID {
            row.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
            rows.push(row.clone());
            return Ok(row);
        }

        let slot = rows
            .iter_mut()
            .find(|r| r.id() == row.id())
            .ok_or(RepoError::NotFound)?;
        *slot = row.clone();
        Ok(row)
    }
}

impl Default for InMemoryForumRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForumRepository for InMemoryForumRepository {
    async fn find_area(&self, context_id: &str, type_id: &str) -> Result<Option<Area>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .areas
            .iter()
            .find(|a| a.context_id == context_id && a.type_id == type_id)
            .cloned())
    }

    async fn save_area(&self, area: Area) -> Result<Area, RepoError> {
        let mut tables = self.tables.write().await;
        self.upsert(&mut tables.areas, area)
    }

    async fn forums_for_context(
        &self,
        context_id: &str,
    ) -> Result<Vec<DiscussionForum>, RepoError> {
        let tables = self.tables.read().await;
        let forums = tables
            .forums
            .iter()
            .filter(|f| f.context_id == context_id)
            .map(|f| DiscussionForum {
                topics: tables
                    .topics
                    .iter()
                    .filter(|t| t.forum_id == f.id)
                    .cloned()
                    .collect(),
                ..f.clone()
            })
            .collect();
        Ok(forums)
    }

    async fn save_forum(&self, mut forum: DiscussionForum) -> Result<DiscussionForum, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.areas.iter().any(|a| a.id == forum.area_id) {
            return Err(RepoError::Constraint(format!(
                "area {} does not exist",
                forum.area_id
            )));
        }
        let topics = std::mem::take(&mut forum.topics);
        let mut saved = self.upsert(&mut tables.forums, forum)?;
        saved.topics = topics;
        Ok(saved)
    }

    async fn save_topic(&self, topic: DiscussionTopic) -> Result<DiscussionTopic, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.forums.iter().any(|f| f.id == topic.forum_id) {
            return Err(RepoError::Constraint(format!(
                "forum {} does not exist",
                topic.forum_id
            )));
        }
        self.upsert(&mut tables.topics, topic)
    }

    async fn topic_with_messages(
        &self,
        topic_id: i64,
    ) -> Result<Option<(DiscussionTopic, Vec<Message>)>, RepoError> {
        let tables = self.tables.read().await;
        let Some(topic) = tables.topics.iter().find(|t| t.id == topic_id) else {
            return Ok(None);
        };
        let messages = tables
            .messages
            .iter()
            .filter(|m| m.topic_id == topic_id)
            .cloned()
            .collect();
        Ok(Some((topic.clone(), messages)))
    }

    async fn save_message(&self, message: Message) -> Result<Message, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.topics.iter().any(|t| t.id == message.topic_id) {
            return Err(RepoError::Constraint(format!(
                "topic {} does not exist",
                message.topic_id
            )));
        }
        self.upsert(&mut tables.messages, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::domain::DISCUSSION_FORUM_TYPE;

    #[tokio::test]
    async fn test_ids_follow_creation_order() {
        let repo = InMemoryForumRepository::new();
        let area = repo.save_area(Area::discussion_defaults("s1")).await.unwrap();
        let forum = repo
            .save_forum(DiscussionForum::new(area.id, "s1", "General", "prof"))
            .await
            .unwrap();
        let topic = repo
            .save_topic(DiscussionTopic::new(forum.id, "Intro", "prof"))
            .await
            .unwrap();

        assert!(area.id > UNSAVED_ID);
        assert!(area.id < forum.id && forum.id < topic.id);
    }

    #[tokio::test]
    async fn test_find_area_by_context_and_type() {
        let repo = InMemoryForumRepository::new();
        repo.save_area(Area::discussion_defaults("s1")).await.unwrap();

        assert!(repo.find_area("s1", DISCUSSION_FORUM_TYPE).await.unwrap().is_some());
        assert!(repo.find_area("s2", DISCUSSION_FORUM_TYPE).await.unwrap().is_none());
        assert!(repo.find_area("s1", "private-messages").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forums_join_topics() {
        let repo = InMemoryForumRepository::new();
        let area = repo.save_area(Area::discussion_defaults("s1")).await.unwrap();
        let general = repo
            .save_forum(DiscussionForum::new(area.id, "s1", "General", "prof"))
            .await
            .unwrap();
        let labs = repo
            .save_forum(DiscussionForum::new(area.id, "s1", "Labs", "prof"))
            .await
            .unwrap();
        repo.save_topic(DiscussionTopic::new(general.id, "Intro", "prof"))
            .await
            .unwrap();
        repo.save_topic(DiscussionTopic::new(general.id, "Exams", "prof"))
            .await
            .unwrap();

        let forums = repo.forums_for_context("s1").await.unwrap();
        assert_eq!(forums.len(), 2);
        assert_eq!(forums[0].id, general.id);
        assert_eq!(
            forums[0].topics.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            ["Intro", "Exams"]
        );
        assert_eq!(forums[1].id, labs.id);
        assert!(forums[1].topics.is_empty());
        assert!(repo.forums_for_context("s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_missing_rows() {
        let repo = InMemoryForumRepository::new();
        let mut area = repo.save_area(Area::discussion_defaults("s1")).await.unwrap();

        area.locked = true;
        let updated = repo.save_area(area.clone()).await.unwrap();
        assert_eq!(updated.id, area.id);
        assert!(repo.find_area("s1", DISCUSSION_FORUM_TYPE).await.unwrap().unwrap().locked);

        let mut ghost = Area::discussion_defaults("s1");
        ghost.id = 999;
        assert!(matches!(repo.save_area(ghost).await, Err(RepoError::NotFound)));

        let orphan = Message::new(12345, "t", "b", "u");
        assert!(matches!(
            repo.save_message(orphan).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_topic_with_messages() {
        let repo = InMemoryForumRepository::new();
        let area = repo.save_area(Area::discussion_defaults("s1")).await.unwrap();
        let forum = repo
            .save_forum(DiscussionForum::new(area.id, "s1", "General", "prof"))
            .await
            .unwrap();
        let topic = repo
            .save_topic(DiscussionTopic::new(forum.id, "Intro", "prof"))
            .await
            .unwrap();

        let first = repo
            .save_message(Message::new(topic.id, "Hi", "Hello", "prof"))
            .await
            .unwrap();
        let second = repo
            .save_message(Message::new(topic.id, "Re: Hi", "Hey", "student").replying_to(&first))
            .await
            .unwrap();

        let (found, messages) = repo.topic_with_messages(topic.id).await.unwrap().unwrap();
        assert_eq!(found.id, topic.id);
        assert_eq!(messages, vec![first.clone(), second]);
        assert_eq!(messages[1].in_reply_to, Some(first.id));
        assert!(repo.topic_with_messages(4242).await.unwrap().is_none());
    }
}
