use crate::api::handlers::{
    admin, auth, bulletin, catalog, chat, health, session, student, teacher, views,
};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Routes mounted under `/api`.
pub fn create_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/login", post(auth::login))
        .route("/views/resolve", post(views::resolve))
        .route("/certifications", get(catalog::list_certifications));

    let protected_routes = Router::new()
        // Session
        .route("/auth/logout", post(auth::logout))
        .route("/session", get(session::get_session))
        .route("/session/section", put(session::navigate))
        .route("/profile", get(session::profile))
        // Assistant
        .route("/chat", post(chat::chat))
        .route("/chat/history", get(chat::history))
        // Shared
        .route(
            "/bulletin",
            get(bulletin::list_posts).post(bulletin::publish_post),
        )
        // Student routes
        .route("/student/dashboard", get(student::dashboard))
        .route("/student/notes", get(student::notes))
        .route("/student/schedule", get(student::schedule))
        .route("/student/assignments", get(student::assignments))
        .route(
            "/student/assignments/{id}/submit",
            post(student::submit_assignment),
        )
        .route(
            "/student/requests",
            get(student::list_requests).post(student::create_request),
        )
        .route("/student/library", get(student::library))
        .route("/student/certifications", get(student::certifications))
        // Teacher routes
        .route("/teacher/dashboard", get(teacher::dashboard))
        .route(
            "/teacher/assignments",
            get(teacher::list_assignments).post(teacher::create_assignment),
        )
        .route(
            "/teacher/assignments/{id}/submissions",
            get(teacher::list_submissions),
        )
        .route(
            "/teacher/submissions/{id}/grade",
            post(teacher::grade_submission),
        )
        // Admin routes
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/admin/users/{id}/reset-password",
            post(admin::reset_password),
        )
        .route("/admin/requests", get(admin::list_requests))
        .route("/admin/requests/{id}", put(admin::update_request))
        .layer(middleware::from_fn_with_state(
            state,
            crate::auth::middleware::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// The complete application: health probe, `/api`, OpenAPI document,
/// request tracing and CORS.
pub fn create_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health::health))
        .nest("/api", create_router(state.clone()));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", crate::api::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let app = app.route("/api-docs/openapi.json", get(crate::api::openapi_json));

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
