use crate::{
    auth::middleware::AuthSession,
    session::PortalContext,
    types::{LoginRequest, Result, TokenResponse},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// Login with a demo account
///
/// Creates a fresh portal context (dashboard view, welcome message) and
/// returns an access token bound to it.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let mut context = PortalContext::new();
    let session = context
        .login(&state.directory, &payload.email, &payload.password)?
        .clone();
    let screen = context.screen();
    let session_id = context.id().to_string();

    let token = state.auth_service.generate_access_token(
        &session.user_id,
        &session.email,
        session.role,
        &session_id,
    )?;
    state.sessions.insert(context);

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.access_expiry(),
        user: session.profile,
        screen,
    }))
}

/// Logout and revoke the session
///
/// Cancels backend calls still in flight and forgets the context; the token
/// stops working immediately.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer" = []))
)]
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> StatusCode {
    state.sessions.remove(&auth.claims.sid);
    auth.context.lock().logout();
    StatusCode::NO_CONTENT
}
