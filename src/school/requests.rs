//! Student requests to the administration.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::session::Session;
use crate::types::{
    AppError, NewStudentRequest, RequestStatus, RequestUpdate, Result, StudentRequest,
};

/// Files a new request from `student`; it starts out pending.
pub fn submit_request(
    requests: &mut Vec<StudentRequest>,
    student: &Session,
    draft: NewStudentRequest,
    now: DateTime<Utc>,
) -> Result<StudentRequest> {
    if draft.subject.trim().is_empty() || draft.description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Subject and description are required".to_string(),
        ));
    }

    let request = StudentRequest {
        id: Uuid::new_v4().to_string(),
        student_id: student.user_id.clone(),
        student_name: student.display_name.clone(),
        kind: draft.kind,
        subject: draft.subject.trim().to_string(),
        description: draft.description,
        status: RequestStatus::Pending,
        created_at: now,
        updated_at: now,
        admin_response: None,
    };
    requests.push(request.clone());
    Ok(request)
}

/// Records an administrator's decision on request `id`.
pub fn update_request(
    requests: &mut [StudentRequest],
    id: &str,
    update: RequestUpdate,
    now: DateTime<Utc>,
) -> Result<StudentRequest> {
    let request = requests
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;

    request.status = update.status;
    let response = update.response.trim();
    request.admin_response = (!response.is_empty()).then(|| response.to_string());
    request.updated_at = now;

    tracing::info!("Request {} is now {:?}", id, request.status);
    Ok(request.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::CredentialDirectory;
    use crate::backend::fixtures;
    use crate::session::PortalContext;
    use crate::types::RequestKind;

    fn student() -> Session {
        let mut context = PortalContext::new();
        context
            .login(&CredentialDirectory::default(), "student@example.com", "password")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_submit_appends_pending() {
        let mut requests = fixtures::student_requests("1", "Djeukeng Kana");
        let draft = NewStudentRequest {
            kind: RequestKind::TechnicalIssue,
            subject: "Wi-Fi".to_string(),
            description: "Pas de connexion en salle A101".to_string(),
        };

        let request = submit_request(&mut requests, &student(), draft, Utc::now()).unwrap();

        assert_eq!(requests.len(), 3);
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.student_id, "1");
        assert_eq!(request.created_at, request.updated_at);
    }

    #[test]
    fn test_submit_requires_subject() {
        let mut requests = Vec::new();
        let draft = NewStudentRequest {
            kind: RequestKind::Other,
            subject: String::new(),
            description: "x".to_string(),
        };
        assert!(submit_request(&mut requests, &student(), draft, Utc::now()).is_err());
        assert!(requests.is_empty());
    }

    #[test]
    fn test_update_sets_response_and_timestamp() {
        let mut requests = fixtures::requests();
        let before = requests[0].updated_at;

        let updated = update_request(
            &mut requests,
            "1",
            RequestUpdate {
                status: RequestStatus::Resolved,
                response: "Note corrigée".to_string(),
            },
            Utc::now(),
        )
        .unwrap();

        assert_eq!(updated.status, RequestStatus::Resolved);
        assert_eq!(updated.admin_response.as_deref(), Some("Note corrigée"));
        assert!(updated.updated_at > before);
        assert_eq!(requests[0], updated);
    }

    #[test]
    fn test_update_unknown_request() {
        let mut requests = fixtures::requests();
        let result = update_request(
            &mut requests,
            "404",
            RequestUpdate {
                status: RequestStatus::Closed,
                response: String::new(),
            },
            Utc::now(),
        );
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
