//! Login and logout.

use actix_web::{HttpResponse, web};

use campus_core::ports::AuthError;
use campus_shared::dto::{LoginRequest, SessionQuery, SessionResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/session
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(user) = state.users.find_by_eid(&req.eid).await? else {
        tracing::info!(eid = %req.eid, "Login failed: unknown user");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(eid = %req.eid, "Login failed: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let session = state.sessions.start(&user).await?;

    Ok(HttpResponse::Created().json(SessionResponse {
        session_id: session.id,
    }))
}

/// DELETE /api/session?sessionid=
pub async fn logout(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> AppResult<HttpResponse> {
    state.sessions.invalidate(&query.sessionid).await?;
    Ok(HttpResponse::NoContent().finish())
}
