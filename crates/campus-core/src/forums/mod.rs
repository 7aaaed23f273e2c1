//! Forum orchestration: find-or-create a forum and topic, then append a
//! message; list a site's forums for administrators.

mod error;

use std::sync::Arc;

use crate::domain::{
    Area, DISCUSSION_FORUM_TYPE, DiscussionForum, DiscussionTopic, FORUMS_TOOL_ID, Message,
    SITE_UPDATE_FUNCTION, Session, Site, ToolConfiguration,
};
use crate::error::RepoError;
use crate::ports::{ForumRepository, SessionManager, SiteService};

pub use error::{FAILURE, ForumError, SUCCESS};

/// Arguments of an add-message call.
#[derive(Debug, Clone)]
pub struct AddMessage {
    pub session_id: String,
    /// Site id.
    pub context: String,
    pub forum: String,
    pub topic: String,
    /// Author recorded on created forums, topics and the message.
    pub user: String,
    pub title: String,
    pub body: String,
}

/// The site and forums tool placement a call operates in.
///
/// Passed explicitly down the call chain instead of living in request-global
/// state.
#[derive(Debug, Clone)]
pub struct ForumContext {
    pub site: Site,
    pub placement: ToolConfiguration,
}

impl ForumContext {
    pub fn site_id(&self) -> &str {
        &self.site.id
    }
}

/// Pick the item whose title equals `title`, else the last one.
///
/// Items are expected in creation order, so duplicates resolve to the oldest
/// match and the fallback is the newest item.
pub fn select_by_title<'a, T>(
    items: &'a [T],
    title: &str,
    title_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    items
        .iter()
        .find(|item| title_of(item) == title)
        .or_else(|| items.last())
}

pub struct ForumService {
    sessions: Arc<dyn SessionManager>,
    sites: Arc<dyn SiteService>,
    forums: Arc<dyn ForumRepository>,
}

impl ForumService {
    pub fn new(
        sessions: Arc<dyn SessionManager>,
        sites: Arc<dyn SiteService>,
        forums: Arc<dyn ForumRepository>,
    ) -> Self {
        Self {
            sessions,
            sites,
            forums,
        }
    }

    /// Append a message to the named forum and topic of a site.
    ///
    /// When the site has no forums at all, a default area, the forum and the
    /// topic are created first. The new message replies to the newest
    /// message already in the topic.
    pub async fn add_message(&self, req: &AddMessage) -> Result<Message, ForumError> {
        let session = self.sessions.establish(&req.session_id).await?;
        let ctx = self.forum_context(&req.context).await?;

        tracing::debug!(
            session_user = %session.user_eid,
            site = %ctx.site_id(),
            placement = %ctx.placement.id,
            "Adding forum message"
        );

        let forum = match self.select_forum(&ctx, &req.forum).await? {
            Some(forum) => forum,
            None => {
                self.create_default_forum(&ctx, req).await?;
                self.select_forum(&ctx, &req.forum)
                    .await?
                    .ok_or_else(|| ForumError::NoForums(ctx.site_id().to_string()))?
            }
        };

        // Draft topics are reported but still eligible.
        for topic in forum.topics.iter().filter(|t| !t.draft) {
            tracing::debug!(topic_id = topic.id, title = %topic.title, "Topic");
        }

        let topic = select_by_title(&forum.topics, &req.topic, |t| t.title.as_str())
            .ok_or(ForumError::NoTopic)?;

        let (topic, messages) = self
            .forums
            .topic_with_messages(topic.id)
            .await?
            .ok_or(ForumError::Repo(RepoError::NotFound))?;

        let mut message = Message::new(topic.id, &req.title, &req.body, &req.user);
        if let Some(previous) = messages.last() {
            message = message.replying_to(previous);
        }

        let saved = self.forums.save_message(message).await?;

        tracing::info!(
            site = %ctx.site_id(),
            forum_id = forum.id,
            topic_id = topic.id,
            message_id = saved.id,
            in_reply_to = ?saved.in_reply_to,
            "Forum message added"
        );

        Ok(saved)
    }

    /// All forums of a site with their topics, drafts included.
    ///
    /// Only super users and users allowed to update the site may list.
    pub async fn forums_in_site(
        &self,
        session_id: &str,
        site_id: &str,
    ) -> Result<Vec<DiscussionForum>, ForumError> {
        let session = self.sessions.establish(session_id).await?;

        let site = match self.sites.get_site(site_id).await? {
            Some(site) => site,
            None => {
                tracing::warn!(site = %site_id, "forums_in_site: site not found");
                return Err(ForumError::SiteNotFound(site_id.to_string()));
            }
        };

        if !self.may_administer(&session, &site).await {
            tracing::warn!(
                user = %session.user_eid,
                site = %site_id,
                "forums_in_site: permission denied, must be a super user or site maintainer"
            );
            return Err(ForumError::PermissionDenied {
                user: session.user_eid,
                site: site_id.to_string(),
            });
        }

        let ctx = Self::context_for(site)?;
        let forums = self.forums.forums_for_context(ctx.site_id()).await?;

        tracing::debug!(site = %site_id, forums = forums.len(), "Listed forums");
        Ok(forums)
    }

    async fn may_administer(&self, session: &Session, site: &Site) -> bool {
        session.super_user
            || self
                .sites
                .unlock(&session.user_eid, SITE_UPDATE_FUNCTION, site)
                .await
    }

    async fn forum_context(&self, site_id: &str) -> Result<ForumContext, ForumError> {
        let site = self
            .sites
            .get_site(site_id)
            .await?
            .ok_or_else(|| ForumError::SiteNotFound(site_id.to_string()))?;
        Self::context_for(site)
    }

    fn context_for(site: Site) -> Result<ForumContext, ForumError> {
        let placement = site
            .tool_for_common_id(FORUMS_TOOL_ID)
            .cloned()
            .ok_or_else(|| ForumError::ToolNotFound(site.id.clone()))?;
        Ok(ForumContext { site, placement })
    }

    async fn select_forum(
        &self,
        ctx: &ForumContext,
        title: &str,
    ) -> Result<Option<DiscussionForum>, ForumError> {
        let forums = self.forums.forums_for_context(ctx.site_id()).await?;
        for forum in &forums {
            tracing::debug!(forum_id = forum.id, title = %forum.title, "Forum");
        }
        Ok(select_by_title(&forums, title, |f| f.title.as_str()).cloned())
    }

    async fn create_default_forum(
        &self,
        ctx: &ForumContext,
        req: &AddMessage,
    ) -> Result<(), ForumError> {
        let area = match self
            .forums
            .find_area(ctx.site_id(), DISCUSSION_FORUM_TYPE)
            .await?
        {
            Some(area) => area,
            None => {
                let area = self
                    .forums
                    .save_area(Area::discussion_defaults(ctx.site_id()))
                    .await?;
                tracing::debug!(area_id = area.id, site = %ctx.site_id(), "Created area");
                area
            }
        };

        let forum = self
            .forums
            .save_forum(DiscussionForum::new(
                area.id,
                ctx.site_id(),
                &req.forum,
                &req.user,
            ))
            .await?;
        tracing::debug!(forum_id = forum.id, title = %forum.title, "Created forum");

        let topic = self
            .forums
            .save_topic(DiscussionTopic::new(forum.id, &req.topic, &req.user))
            .await?;
        tracing::debug!(topic_id = topic.id, title = %topic.title, "Created topic");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_first_exact_match() {
        let titles = ["general", "help", "general"];
        let picked = select_by_title(&titles, "general", |t| *t);
        assert!(std::ptr::eq(picked.unwrap(), &titles[0]));
    }

    #[test]
    fn test_select_falls_back_to_last() {
        let titles = ["general", "help"];
        assert_eq!(select_by_title(&titles, "missing", |t| *t), Some(&"help"));
    }

    #[test]
    fn test_select_empty() {
        let titles: [&str; 0] = [];
        assert_eq!(select_by_title(&titles, "general", |t| *t), None);
    }
}
