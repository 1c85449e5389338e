use crate::session::SharedContext;
use crate::types::{AppError, Claims, Role};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

/// Verifies the bearer token and attaches the caller's live portal context.
///
/// A token whose session was logged out is rejected even if it has not
/// expired yet.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Auth("Missing bearer token".to_string()))?;

    let claims = state.auth_service.verify_token(token)?;

    let context = state.sessions.get(&claims.sid).ok_or_else(|| {
        tracing::debug!(
            "Rejected token {} for closed session",
            &state.auth_service.hash_token(token)[..12]
        );
        AppError::Auth("Session expired or signed out".to_string())
    })?;

    let owns_session = context
        .lock()
        .session()
        .is_some_and(|session| session.user_id == claims.sub);
    if !owns_session {
        return Err(AppError::Auth("Session expired or signed out".to_string()));
    }

    req.extensions_mut().insert(AuthSession { claims, context });

    Ok(next.run(req).await)
}

/// The authenticated caller: token claims plus the portal context they own.
#[derive(Clone)]
pub struct AuthSession {
    pub claims: Claims,
    pub context: SharedContext,
}

impl AuthSession {
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Rejects callers whose role is not `role`.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.claims.role != role {
            tracing::debug!(
                "User {} ({}) denied access to {} endpoint",
                self.claims.sub,
                self.claims.role,
                role
            );
            return Err(AppError::Forbidden(format!(
                "Reserved to the {} role",
                role
            )));
        }
        Ok(())
    }

    /// Rejects callers whose role is not in `roles`.
    pub fn require_any(&self, roles: &[Role]) -> Result<(), AppError> {
        if !roles.contains(&self.claims.role) {
            return Err(AppError::Forbidden(format!(
                "Not available to the {} role",
                self.claims.role
            )));
        }
        Ok(())
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .ok_or_else(|| AppError::Auth("Not signed in".to_string()))
    }
}
