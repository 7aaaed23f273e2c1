use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Area, DiscussionForum, DiscussionTopic, Message, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their external login id.
    async fn find_by_eid(&self, eid: &str) -> Result<Option<User>, RepoError>;
}

/// Storage for areas, forums, topics and messages.
///
/// Every `save_*` method inserts when the entity carries
/// [`UNSAVED_ID`](crate::domain::UNSAVED_ID) and updates otherwise, returning
/// the stored entity with its id. Lists come back in creation order.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn find_area(&self, context_id: &str, type_id: &str) -> Result<Option<Area>, RepoError>;

    async fn save_area(&self, area: Area) -> Result<Area, RepoError>;

    /// Forums of a site, each with its topics.
    async fn forums_for_context(&self, context_id: &str) -> Result<Vec<DiscussionForum>, RepoError>;

    async fn save_forum(&self, forum: DiscussionForum) -> Result<DiscussionForum, RepoError>;

    async fn save_topic(&self, topic: DiscussionTopic) -> Result<DiscussionTopic, RepoError>;

    /// A topic together with its messages.
    async fn topic_with_messages(
        &self,
        topic_id: i64,
    ) -> Result<Option<(DiscussionTopic, Vec<Message>)>, RepoError>;

    async fn save_message(&self, message: Message) -> Result<Message, RepoError>;
}
