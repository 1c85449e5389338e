//! # Campus Portal
//!
//! A role-based school portal served as a JSON API. Students, teachers and
//! administrators sign in with demo accounts, move between the sections of
//! their dashboard, talk to a keyword-driven assistant and work with grades,
//! timetables, assignments, bulletin posts, requests and user accounts held
//! by a simulated school backend.
//!
//! ## Overview
//!
//! The portal can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `campus-portal` binary
//! 2. **As a library** - Embed the router or the decision components
//!
//! ### Routing a view
//!
//! ```rust
//! use campus::types::Role;
//! use campus::views::{route, PublicView};
//!
//! let screen = route(true, Some(Role::Teacher), "grading", PublicView::Landing);
//! assert_eq!(screen.id(), "teacher/grading");
//!
//! // Sections outside the role's menu fall back to the dashboard.
//! let screen = route(true, Some(Role::Admin), "grading", PublicView::Landing);
//! assert_eq!(screen.id(), "admin/dashboard");
//! ```
//!
//! ### Asking the assistant
//!
//! ```rust
//! use campus::assistant::{DispatchContext, IntentDispatcher};
//!
//! let dispatcher = IntentDispatcher::default();
//! let reply = dispatcher.dispatch("va à mes notes", &DispatchContext::new("Djeukeng Kana"));
//! assert_eq!(reply.action.unwrap().target_section(), Some("notes"));
//! ```
//!
//! ### Embedding the server
//!
//! ```rust,ignore
//! use campus::{AppState, PortalConfigManager};
//! use campus::backend::SimulatedBackend;
//! use std::sync::Arc;
//!
//! let config = PortalConfigManager::new("campus.toml")?;
//! let latency = config.config().backend.latency();
//! let state = AppState::new(Arc::new(config), Arc::new(SimulatedBackend::new(latency)))?;
//! let app = campus::api::routes::create_app(state);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Interactive API documentation at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`assistant`] - Rule-based chat assistant
//! - [`auth`] - Demo credentials, JWT and middleware
//! - [`backend`] - School backend trait and its simulated implementation
//! - [`school`] - Grades, dashboards, bulletin, requests, accounts, catalogs
//! - [`session`] - Per-client portal contexts
//! - [`views`] - Role-based view router
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Keyword-driven chat assistant.
pub mod assistant;
/// Sign-in, JWT and middleware.
pub mod auth;
/// School backend abstraction and simulated implementation.
pub mod backend;
/// Command-line interface.
pub mod cli;
/// School records logic.
pub mod school;
/// Per-client portal contexts.
pub mod session;
/// Core types (records, requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Role-based view router.
pub mod views;

// Re-export commonly used types
pub use assistant::IntentDispatcher;
pub use backend::{PortalBackend, SimulatedBackend};
pub use session::{PortalContext, SessionStore};
pub use types::{AppError, Result};
pub use utils::toml_config::{PortalConfig, PortalConfigManager};

use crate::auth::directory::CredentialDirectory;
use crate::auth::jwt::AuthService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based configuration with reload support
    pub config: Arc<PortalConfigManager>,
    /// Token issuing and verification
    pub auth_service: Arc<AuthService>,
    /// Accounts allowed to sign in
    pub directory: Arc<CredentialDirectory>,
    /// Live portal contexts
    pub sessions: Arc<SessionStore>,
    /// School backend
    pub backend: Arc<dyn PortalBackend>,
    /// Chat assistant rule table
    pub dispatcher: Arc<IntentDispatcher>,
}

impl AppState {
    /// Wires the default directory and dispatcher around `backend`.
    ///
    /// Fails when the JWT secret env var named in the config is not set.
    pub fn new(config: Arc<PortalConfigManager>, backend: Arc<dyn PortalBackend>) -> Result<Self> {
        let current = config.config();
        let secret = current
            .jwt_secret()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let auth_service = AuthService::new(secret, current.auth.jwt_access_expiry);

        Ok(Self::with_parts(
            config,
            Arc::new(auth_service),
            backend,
            Arc::new(IntentDispatcher::default()),
        ))
    }

    pub fn with_parts(
        config: Arc<PortalConfigManager>,
        auth_service: Arc<AuthService>,
        backend: Arc<dyn PortalBackend>,
        dispatcher: Arc<IntentDispatcher>,
    ) -> Self {
        Self {
            config,
            auth_service,
            directory: Arc::new(CredentialDirectory::default()),
            sessions: Arc::new(SessionStore::new()),
            backend,
            dispatcher,
        }
    }
}
