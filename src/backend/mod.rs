//! School backend abstraction
//!
//! [`PortalBackend`] has one method per school-backend operation. Every call
//! carries the caller's [`Credential`] and a [`CancellationToken`]; a cancelled
//! call resolves to [`BackendError::Cancelled`] and its result is dropped.
//!
//! The only implementation shipped is [`SimulatedBackend`], which waits a
//! configurable latency and answers with fixed demo records.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::types::{
    Assignment, NewAssignment, NewUserAccount, Note, RequestKind, RequestStatus, ScheduleItem,
    StudentRequest, Submission, UploadedFile, UserAccount,
};

/// Demo records returned by the simulated backend.
pub mod fixtures;
/// Latency-simulating backend.
pub mod simulated;

pub use simulated::{Latency, SimulatedBackend};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend rejected credential: {0}")]
    Auth(String),

    #[error("Backend call cancelled")]
    Cancelled,
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Bearer credential presented to the school backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Operations offered by the school backend.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    // Student
    async fn fetch_notes(
        &self,
        credential: &Credential,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Note>>;

    async fn fetch_schedule(
        &self,
        credential: &Credential,
        promotion: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<ScheduleItem>>;

    async fn fetch_assignments(
        &self,
        credential: &Credential,
        promotion: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Assignment>>;

    async fn submit_assignment(
        &self,
        credential: &Credential,
        assignment_id: &str,
        files: &[UploadedFile],
        comments: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;

    async fn submit_request(
        &self,
        credential: &Credential,
        kind: RequestKind,
        subject: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;

    // Teacher
    async fn fetch_teacher_assignments(
        &self,
        credential: &Credential,
        teacher_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Assignment>>;

    async fn fetch_submissions(
        &self,
        credential: &Credential,
        assignment_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Submission>>;

    async fn grade_submission(
        &self,
        credential: &Credential,
        submission_id: &str,
        grade: f64,
        feedback: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;

    async fn create_assignment(
        &self,
        credential: &Credential,
        assignment: &NewAssignment,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;

    // Admin
    async fn fetch_all_users(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<UserAccount>>;

    async fn create_user(
        &self,
        credential: &Credential,
        user: &NewUserAccount,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;

    /// Returns the new password.
    async fn reset_password(
        &self,
        credential: &Credential,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<String>;

    async fn fetch_all_requests(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<StudentRequest>>;

    async fn update_request_status(
        &self,
        credential: &Credential,
        request_id: &str,
        status: RequestStatus,
        response: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool>;
}

/// Loads notes and schedule concurrently; fails if either fails.
pub async fn load_student_dashboard(
    backend: &dyn PortalBackend,
    credential: &Credential,
    user_id: &str,
    promotion: &str,
    cancel: &CancellationToken,
) -> BackendResult<(Vec<Note>, Vec<ScheduleItem>)> {
    tokio::try_join!(
        backend.fetch_notes(credential, user_id, cancel),
        backend.fetch_schedule(credential, promotion, cancel),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::bearer("secret-token");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.as_str(), "secret-token");
    }

    #[test]
    fn test_blank_credential_is_empty() {
        assert!(Credential::bearer("   ").is_empty());
        assert!(!Credential::bearer("t").is_empty());
    }
}
