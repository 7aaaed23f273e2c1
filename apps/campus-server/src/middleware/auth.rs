//! Session extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{FutureExt, LocalBoxFuture};

use campus_core::domain::Session;
use campus_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the session id when it is not in the query string.
pub const SESSION_HEADER: &str = "X-Session-Id";

/// The established session of the caller.
///
/// The id is taken from the `sessionid` query parameter, else from the
/// `X-Session-Id` header:
/// ```ignore
/// async fn zone(session: CurrentSession) -> impl Responder {
///     format!("Hello, {}!", session.0.user_eid)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Session id supplied with the request, if any.
pub fn session_id(req: &HttpRequest) -> Option<String> {
    web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .ok()
        .and_then(|params| {
            params
                .into_inner()
                .into_iter()
                .find(|(k, _)| k == "sessionid")
                .map(|(_, v)| v)
        })
        .or_else(|| {
            req.headers()
                .get(SESSION_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .filter(|id| !id.trim().is_empty())
}

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let id = session_id(req);

        async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };
            let id = id.ok_or(AuthError::MissingSession)?;
            let session = state.sessions.establish(&id).await?;
            Ok(CurrentSession(session))
        }
        .boxed_local()
    }
}
