//! Sign-in and request authentication
//!
//! # Module Structure
//!
//! - [`auth::directory`](crate::auth::directory) - the demo credential directory
//! - [`auth::jwt`](crate::auth::jwt) - access token encoding and decoding
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware and the [`AuthSession`](crate::auth::middleware::AuthSession) extractor
//!
//! # Flow
//!
//! 1. `POST /api/auth/login` checks the e-mail and password against the
//!    [`CredentialDirectory`](crate::auth::directory::CredentialDirectory),
//!    creates a portal context and registers it in the session store.
//! 2. The returned HS256 access token carries the user id, role and the
//!    session id (`sid`) of that context.
//! 3. Protected routes run [`auth_middleware`](crate::auth::middleware::auth_middleware),
//!    which rejects tokens whose session no longer exists. Logging out
//!    removes the context, so its tokens stop working immediately.
//!
//! ## Extracting the session in handlers
//!
//! ```ignore
//! use campus::auth::middleware::AuthSession;
//!
//! async fn profile(auth: AuthSession) -> impl IntoResponse {
//!     format!("Hello, {}!", auth.claims.email)
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `campus.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"  # Env var holding the signing secret
//! jwt_access_expiry = 3600       # Token validity in seconds
//! ```

/// Fixed demo accounts.
pub mod directory;
/// JWT token generation and validation.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
