use crate::{
    auth::middleware::AuthSession,
    types::{NavigateRequest, Result, SessionResponse, UserProfile},
    views::{Screen, ViewState},
};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ViewResponse {
    pub view: ViewState,
    pub screen: Screen,
}

/// Current session, view state and screen
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session",
    security(("bearer" = []))
)]
pub async fn get_session(auth: AuthSession) -> Result<Json<SessionResponse>> {
    let context = auth.context.lock();
    let session = context.require_session()?;

    Ok(Json(SessionResponse {
        user: session.profile.clone(),
        view: context.view().clone(),
        screen: context.screen(),
        started_at: session.started_at,
    }))
}

/// Move to another section of the dashboard
///
/// Sections that are not on the caller's menu land on `dashboard`.
#[utoipa::path(
    put,
    path = "/api/session/section",
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "New view", body = ViewResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session",
    security(("bearer" = []))
)]
pub async fn navigate(
    auth: AuthSession,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<ViewResponse>> {
    let mut context = auth.context.lock();
    let screen = context.navigate(&payload.section);

    Ok(Json(ViewResponse {
        view: context.view().clone(),
        screen,
    }))
}

/// Profile of the signed-in user
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session",
    security(("bearer" = []))
)]
pub async fn profile(auth: AuthSession) -> Result<Json<UserProfile>> {
    let context = auth.context.lock();
    Ok(Json(context.require_session()?.profile.clone()))
}
