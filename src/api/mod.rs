//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer of the portal, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Public
//! - `GET /health` - Health check endpoint
//! - `POST /api/auth/login` - Login and receive a JWT bound to a new portal context
//! - `POST /api/views/resolve` - Screen for an arbitrary view state
//! - `GET /api/certifications` - Public certification catalog
//!
//! ## Session (`/api/session`, `/api/chat`)
//! - `POST /api/auth/logout` - Revoke the portal context
//! - `GET /api/session` - Current session, view and screen
//! - `PUT /api/session/section` - Navigate to a section
//! - `GET /api/profile` - Profile of the signed-in user
//! - `POST /api/chat` - Ask the assistant
//! - `GET /api/chat/history` - Transcript of the session
//! - `GET|POST /api/bulletin` - Bulletin board
//!
//! ## Students (`/api/student`)
//! Dashboard, notes, weekly schedule, assignments and hand-ins, requests,
//! library and certifications.
//!
//! ## Teachers (`/api/teacher`)
//! Dashboard, assignments, submissions and grading.
//!
//! ## Administrators (`/api/admin`)
//! Dashboard, user accounts, password resets and request handling.
//!
//! # Authentication
//!
//! Everything except the public endpoints requires a valid JWT token in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//! Role-specific endpoints answer `403` to the other roles.
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`. When the
//! `swagger-ui` feature is enabled, interactive API documentation is
//! available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use handlers::{admin, auth, bulletin, catalog, chat, health, session, student, teacher, views};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Portal API",
        description = "Role-based school portal: dashboards, assistant and school records"
    ),
    paths(
        health::health,
        auth::login,
        auth::logout,
        session::get_session,
        session::navigate,
        session::profile,
        views::resolve,
        chat::chat,
        chat::history,
        bulletin::list_posts,
        bulletin::publish_post,
        catalog::list_certifications,
        student::dashboard,
        student::notes,
        student::schedule,
        student::assignments,
        student::submit_assignment,
        student::list_requests,
        student::create_request,
        student::library,
        student::certifications,
        teacher::dashboard,
        teacher::list_assignments,
        teacher::create_assignment,
        teacher::list_submissions,
        teacher::grade_submission,
        admin::dashboard,
        admin::list_users,
        admin::create_user,
        admin::reset_password,
        admin::list_requests,
        admin::update_request,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in and sign-out"),
        (name = "session", description = "Session state and navigation"),
        (name = "views", description = "View routing"),
        (name = "chat", description = "Portal assistant"),
        (name = "bulletin", description = "Bulletin board"),
        (name = "catalog", description = "Public catalog"),
        (name = "student", description = "Student space"),
        (name = "teacher", description = "Teacher space"),
        (name = "admin", description = "Administration"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// The generated OpenAPI document.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg_attr(feature = "swagger-ui", allow(dead_code))]
pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
