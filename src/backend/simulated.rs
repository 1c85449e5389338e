use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use super::fixtures;
use super::{BackendError, BackendResult, Credential, PortalBackend};
use crate::types::{
    Assignment, NewAssignment, NewUserAccount, Note, RequestKind, RequestStatus, ScheduleItem,
    StudentRequest, Submission, UploadedFile, UserAccount,
};

/// Base round-trip times in milliseconds.
mod base_ms {
    pub const NOTES: u64 = 500;
    pub const SCHEDULE: u64 = 300;
    pub const ASSIGNMENTS: u64 = 400;
    pub const SUBMIT_ASSIGNMENT: u64 = 1000;
    pub const SUBMIT_REQUEST: u64 = 500;
    pub const TEACHER_ASSIGNMENTS: u64 = 400;
    pub const SUBMISSIONS: u64 = 500;
    pub const GRADE: u64 = 500;
    pub const CREATE_ASSIGNMENT: u64 = 500;
    pub const USERS: u64 = 600;
    pub const CREATE_USER: u64 = 500;
    pub const RESET_PASSWORD: u64 = 500;
    pub const REQUESTS: u64 = 500;
    pub const UPDATE_REQUEST: u64 = 500;
}

/// How long simulated calls take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    /// Multiplier applied to every base latency. `0.0` makes calls instant.
    pub scale: f64,
    /// Upper bound of the random delay added to every call.
    pub jitter_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jitter_ms: 0,
        }
    }
}

impl Latency {
    pub fn instant() -> Self {
        Self {
            scale: 0.0,
            jitter_ms: 0,
        }
    }

    /// Delay for a call whose base latency is `base_ms`.
    pub fn delay(&self, base_ms: u64) -> Duration {
        let scaled = (base_ms as f64 * self.scale.max(0.0)).round() as u64;
        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..=self.jitter_ms)
        } else {
            0
        };
        Duration::from_millis(scaled + jitter)
    }
}

/// Backend that sleeps, then answers with demo records.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    latency: Latency,
}

impl SimulatedBackend {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Checks the credential, then waits out the call unless cancelled first.
    async fn round_trip(
        &self,
        operation: &str,
        base_ms: u64,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        if credential.is_empty() {
            tracing::warn!("Backend call '{}' rejected: missing credential", operation);
            return Err(BackendError::Auth("missing bearer credential".to_string()));
        }

        let delay = self.latency.delay(base_ms);
        tracing::debug!("Backend call '{}' ({:?})", operation, delay);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Backend call '{}' cancelled", operation);
                Err(BackendError::Cancelled)
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

#[async_trait]
impl PortalBackend for SimulatedBackend {
    async fn fetch_notes(
        &self,
        credential: &Credential,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Note>> {
        self.round_trip("fetch_notes", base_ms::NOTES, credential, cancel)
            .await?;
        Ok(fixtures::notes(user_id))
    }

    async fn fetch_schedule(
        &self,
        credential: &Credential,
        promotion: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<ScheduleItem>> {
        self.round_trip("fetch_schedule", base_ms::SCHEDULE, credential, cancel)
            .await?;
        Ok(fixtures::schedule(promotion))
    }

    async fn fetch_assignments(
        &self,
        credential: &Credential,
        promotion: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Assignment>> {
        self.round_trip("fetch_assignments", base_ms::ASSIGNMENTS, credential, cancel)
            .await?;
        Ok(fixtures::assignments(promotion))
    }

    async fn submit_assignment(
        &self,
        credential: &Credential,
        assignment_id: &str,
        files: &[UploadedFile],
        _comments: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip(
            "submit_assignment",
            base_ms::SUBMIT_ASSIGNMENT,
            credential,
            cancel,
        )
        .await?;
        tracing::info!(
            "Assignment {} handed in with {} file(s)",
            assignment_id,
            files.len()
        );
        Ok(true)
    }

    async fn submit_request(
        &self,
        credential: &Credential,
        kind: RequestKind,
        subject: &str,
        _description: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip("submit_request", base_ms::SUBMIT_REQUEST, credential, cancel)
            .await?;
        tracing::info!("Request '{}' filed as {:?}", subject, kind);
        Ok(true)
    }

    async fn fetch_teacher_assignments(
        &self,
        credential: &Credential,
        teacher_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Assignment>> {
        self.round_trip(
            "fetch_teacher_assignments",
            base_ms::TEACHER_ASSIGNMENTS,
            credential,
            cancel,
        )
        .await?;
        Ok(fixtures::teacher_assignments(teacher_id))
    }

    async fn fetch_submissions(
        &self,
        credential: &Credential,
        assignment_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<Submission>> {
        self.round_trip("fetch_submissions", base_ms::SUBMISSIONS, credential, cancel)
            .await?;
        Ok(fixtures::submissions(assignment_id))
    }

    async fn grade_submission(
        &self,
        credential: &Credential,
        submission_id: &str,
        grade: f64,
        _feedback: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip("grade_submission", base_ms::GRADE, credential, cancel)
            .await?;
        tracing::info!("Submission {} graded {}", submission_id, grade);
        Ok(true)
    }

    async fn create_assignment(
        &self,
        credential: &Credential,
        assignment: &NewAssignment,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip(
            "create_assignment",
            base_ms::CREATE_ASSIGNMENT,
            credential,
            cancel,
        )
        .await?;
        tracing::info!(
            "Assignment '{}' created for {}",
            assignment.title,
            assignment.promotion
        );
        Ok(true)
    }

    async fn fetch_all_users(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<UserAccount>> {
        self.round_trip("fetch_all_users", base_ms::USERS, credential, cancel)
            .await?;
        Ok(fixtures::users())
    }

    async fn create_user(
        &self,
        credential: &Credential,
        user: &NewUserAccount,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip("create_user", base_ms::CREATE_USER, credential, cancel)
            .await?;
        tracing::info!("Account created for {} ({})", user.email, user.role);
        Ok(true)
    }

    async fn reset_password(
        &self,
        credential: &Credential,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<String> {
        self.round_trip("reset_password", base_ms::RESET_PASSWORD, credential, cancel)
            .await?;
        tracing::info!("Password reset for user {}", user_id);
        Ok(fixtures::RESET_PASSWORD.to_string())
    }

    async fn fetch_all_requests(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> BackendResult<Vec<StudentRequest>> {
        self.round_trip("fetch_all_requests", base_ms::REQUESTS, credential, cancel)
            .await?;
        Ok(fixtures::requests())
    }

    async fn update_request_status(
        &self,
        credential: &Credential,
        request_id: &str,
        status: RequestStatus,
        _response: &str,
        cancel: &CancellationToken,
    ) -> BackendResult<bool> {
        self.round_trip(
            "update_request_status",
            base_ms::UPDATE_REQUEST,
            credential,
            cancel,
        )
        .await?;
        tracing::info!("Request {} moved to {:?}", request_id, status);
        Ok(true)
    }
}
