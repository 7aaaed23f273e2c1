//! Session user's timezone.

use actix_web::{HttpResponse, web};

use campus_shared::ApiResponse;
use campus_shared::dto::{TimeZoneRequest, TimeZoneResponse};

use crate::middleware::auth::CurrentSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/time/zone
pub async fn get_zone(state: web::Data<AppState>, session: CurrentSession) -> HttpResponse {
    let timezone = state.time.user_timezone(Some(session.0.user_id.as_str())).await;
    HttpResponse::Ok().json(ApiResponse::ok(TimeZoneResponse { timezone }))
}

/// PUT /api/time/zone
pub async fn put_zone(
    state: web::Data<AppState>,
    session: CurrentSession,
    body: web::Json<TimeZoneRequest>,
) -> AppResult<HttpResponse> {
    state
        .time
        .set_user_timezone(&session.0.user_id, body.timezone.as_deref())
        .await?;

    let timezone = state.time.user_timezone(Some(session.0.user_id.as_str())).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(TimeZoneResponse { timezone })))
}
