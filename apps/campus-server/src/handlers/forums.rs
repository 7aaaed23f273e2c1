//! Forum RPC endpoints. Replies are plain text: a status line for
//! add-message, an XML document for the listing.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use campus_core::domain::DiscussionForum;
use campus_core::forums::{AddMessage, ForumError, SUCCESS};
use campus_shared::dto::{AddMessageParams, ForumSummary, ForumsInSiteParams, TopicSummary};
use campus_shared::{ERROR_XML, ForumListDocument};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn text(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body.into())
}

fn command(p: AddMessageParams) -> AddMessage {
    AddMessage {
        session_id: p.sessionid,
        context: p.context,
        forum: p.forum,
        topic: p.topic,
        user: p.user,
        title: p.title,
        body: p.body,
    }
}

fn summary(forum: DiscussionForum) -> ForumSummary {
    ForumSummary {
        id: forum.id,
        title: forum.title,
        topics: forum
            .topics
            .into_iter()
            .map(|t| TopicSummary {
                id: t.id,
                title: t.title,
            })
            .collect(),
    }
}

/// GET /api/forums/addMessage
pub async fn add_message_query(
    state: web::Data<AppState>,
    params: web::Query<AddMessageParams>,
) -> AppResult<HttpResponse> {
    add_message(&state, params.into_inner()).await
}

/// POST /api/forums/addMessage
pub async fn add_message_form(
    state: web::Data<AppState>,
    params: web::Form<AddMessageParams>,
) -> AppResult<HttpResponse> {
    add_message(&state, params.into_inner()).await
}

async fn add_message(state: &AppState, params: AddMessageParams) -> AppResult<HttpResponse> {
    match state.forums.add_message(&command(params)).await {
        Ok(_) => Ok(text(SUCCESS)),
        Err(ForumError::Session(e)) => Err(e.into()),
        Err(e @ (ForumError::ToolNotFound(_) | ForumError::NoForums(_) | ForumError::NoTopic)) => {
            tracing::info!(reason = %e, "Message not added");
            Ok(text(e.status_line()))
        }
        Err(e) => {
            tracing::error!(error = %e, "addMessage failed");
            Ok(text(e.status_line()))
        }
    }
}

/// GET /api/forums/getForumsInSite
pub async fn forums_in_site(
    state: web::Data<AppState>,
    params: web::Query<ForumsInSiteParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();

    let forums = match state
        .forums
        .forums_in_site(&params.sessionid, &params.site_id)
        .await
    {
        Ok(forums) => forums,
        Err(ForumError::Session(e)) => return Err(e.into()),
        Err(e @ ForumError::ToolNotFound(_)) => return Ok(text(e.to_string())),
        // Already logged as a warning.
        Err(ForumError::PermissionDenied { .. }) => return Ok(text(ERROR_XML)),
        Err(e) => {
            tracing::error!(site = %params.site_id, error = %e, "getForumsInSite failed");
            return Ok(text(ERROR_XML));
        }
    };

    let summaries: Vec<ForumSummary> = forums.into_iter().map(summary).collect();
    match ForumListDocument::new(&summaries).to_xml() {
        Ok(xml) => Ok(text(xml)),
        Err(e) => {
            tracing::error!(site = %params.site_id, error = %e, "Failed to write forum list");
            Ok(text(ERROR_XML))
        }
    }
}
