use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assistant::{Action, ChatMessage};
use crate::views::{Screen, ViewState};

mod records;

pub use records::*;

// ============= Roles & Profiles =============

/// The three kinds of portal accounts.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// Parses a role name case-insensitively. Anything else is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile record attached to a demo account.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserProfile,
    pub screen: Screen,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub view: ViewState,
    pub screen: Screen,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NavigateRequest {
    pub section: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveViewRequest {
    #[serde(default)]
    pub authenticated: bool,
    /// Free-form role name; unrecognized values are treated as absent.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub section: String,
    /// Public navigation value used while unauthenticated.
    #[serde(default)]
    pub public_view: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Apply a returned `navigate` action to the session view immediately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_navigate: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub screen: Screen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Portal session the token is bound to.
    pub sid: String,
    pub exp: usize,
    pub iat: usize,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::backend::BackendError> for AppError {
    fn from(err: crate::backend::BackendError) -> Self {
        use crate::backend::BackendError;
        match err {
            BackendError::Network(msg) => AppError::Backend(msg),
            BackendError::Auth(msg) => AppError::Auth(msg),
            BackendError::Cancelled => AppError::Cancelled,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Backend(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Cancelled => (StatusCode::CONFLICT, "Request cancelled".to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Student"), Some(Role::Student));
        assert_eq!(Role::parse(" TEACHER "), Some(Role::Teacher));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("guest"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::Auth("x".into()), 401),
            (AppError::Forbidden("x".into()), 403),
            (AppError::NotFound("x".into()), 404),
            (AppError::InvalidInput("x".into()), 400),
            (AppError::Backend("x".into()), 502),
            (AppError::Cancelled, 409),
            (AppError::Internal("x".into()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }
}
