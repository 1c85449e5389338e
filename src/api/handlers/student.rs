use crate::{
    auth::middleware::AuthSession,
    backend::{fixtures, load_student_dashboard, BackendError},
    school::{
        assignments::{self, AssignmentView},
        certifications::{self, CertificationQuery},
        grades::{self, NoteStats},
        library::{self, LibraryQuery},
        overview::{self, StudentOverview},
        requests,
        schedule::{self, DaySchedule},
    },
    types::{
        AppError, Certification, LibraryDocument, NewStudentRequest, Note, NoteKind, Result,
        Role, StudentRequest, Submission, SubmissionUpload,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotesQuery {
    #[serde(default)]
    pub kind: Option<NoteKind>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
    pub stats: NoteStats,
    /// Weighted average of the listed notes, e.g. `15.5/20`.
    pub average: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleQuery {
    /// Any day of the week to show; defaults to today.
    #[serde(default)]
    pub week: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponse {
    /// Monday of the week shown.
    pub week_of: NaiveDate,
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentCertifications {
    pub enrolled: Vec<Certification>,
    pub catalog: Vec<Certification>,
}

/// Student home page
///
/// Notes and timetable are fetched concurrently. A failed load is logged and
/// shows an empty dashboard.
#[utoipa::path(
    get,
    path = "/api/student/dashboard",
    responses(
        (status = 200, description = "Student overview", body = StudentOverview),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<StudentOverview>> {
    auth.require_role(Role::Student)?;
    let scope = auth.context.lock().scope()?;
    let today = Utc::now().date_naive();

    let loaded = load_student_dashboard(
        state.backend.as_ref(),
        &scope.credential,
        &scope.session.user_id,
        scope.session.promotion(),
        &scope.cancel,
    )
    .await;

    scope.ensure_live()?;
    match loaded {
        Ok((notes, schedule)) => Ok(Json(overview::student_overview(&notes, &schedule, today))),
        Err(BackendError::Cancelled) => Err(AppError::Cancelled),
        Err(e) => {
            tracing::error!("Student dashboard load failed for {}: {}", scope.session.user_id, e);
            Ok(Json(overview::student_overview(&[], &[], today)))
        }
    }
}

/// Notes with their statistics
#[utoipa::path(
    get,
    path = "/api/student/notes",
    params(NotesQuery),
    responses(
        (status = 200, description = "Notes", body = NotesResponse),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn notes(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<NotesQuery>,
) -> Result<Json<NotesResponse>> {
    auth.require_role(Role::Student)?;
    let scope = auth.context.lock().scope()?;

    let all = state
        .backend
        .fetch_notes(&scope.credential, &scope.session.user_id, &scope.cancel)
        .await?;
    scope.ensure_live()?;

    let notes = grades::filter_notes(&all, query.kind);
    let stats = grades::note_stats(&notes);
    Ok(Json(NotesResponse {
        average: grades::format_grade(stats.average),
        stats,
        notes,
    }))
}

/// Weekly timetable
#[utoipa::path(
    get,
    path = "/api/student/schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Week grid, Monday first", body = ScheduleResponse),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn schedule(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>> {
    auth.require_role(Role::Student)?;
    let scope = auth.context.lock().scope()?;
    let week_of = query.week.unwrap_or_else(|| Utc::now().date_naive());

    let items = state
        .backend
        .fetch_schedule(&scope.credential, scope.session.promotion(), &scope.cancel)
        .await?;
    scope.ensure_live()?;

    let days = schedule::week_schedule(&items, week_of);
    Ok(Json(ScheduleResponse {
        week_of: days.first().map(|d| d.date).unwrap_or(week_of),
        days,
    }))
}

/// Assignments of the student's promotion, with time left
#[utoipa::path(
    get,
    path = "/api/student/assignments",
    responses(
        (status = 200, description = "Assignments", body = Vec<AssignmentView>),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn assignments(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<Vec<AssignmentView>>> {
    auth.require_role(Role::Student)?;
    let scope = auth.context.lock().scope()?;

    let fetched = state
        .backend
        .fetch_assignments(&scope.credential, scope.session.promotion(), &scope.cancel)
        .await?;

    let merged = {
        let context = auth.context.lock();
        scope.ensure_live()?;
        assignments::merge_assignments(
            fetched,
            &context.workspace().assignment_cache,
            scope.session.promotion(),
        )
    };
    Ok(Json(assignments::assignment_views(merged, Utc::now())))
}

/// Hand in an assignment
///
/// Only file metadata is accepted.
#[utoipa::path(
    post,
    path = "/api/student/assignments/{id}/submit",
    params(("id" = String, Path, description = "Assignment id")),
    request_body = SubmissionUpload,
    responses(
        (status = 201, description = "Submission recorded", body = Submission),
        (status = 400, description = "No file attached"),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn submit_assignment(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(assignment_id): Path<String>,
    Json(payload): Json<SubmissionUpload>,
) -> Result<(StatusCode, Json<Submission>)> {
    auth.require_role(Role::Student)?;
    assignments::validate_upload(&payload)?;
    let scope = auth.context.lock().scope()?;

    state
        .backend
        .submit_assignment(
            &scope.credential,
            &assignment_id,
            &payload.files,
            &payload.comments,
            &scope.cancel,
        )
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let submission =
        assignments::submission_from_upload(&assignment_id, &scope.session, payload, Utc::now());
    context
        .workspace_mut()
        .submissions
        .entry(assignment_id)
        .or_default()
        .push(submission.clone());

    Ok((StatusCode::CREATED, Json(submission)))
}

/// The student's own requests
#[utoipa::path(
    get,
    path = "/api/student/requests",
    responses(
        (status = 200, description = "Requests", body = Vec<StudentRequest>),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn list_requests(auth: AuthSession) -> Result<Json<Vec<StudentRequest>>> {
    auth.require_role(Role::Student)?;
    let mut context = auth.context.lock();
    let student = context.require_session()?.clone();

    let list = context
        .workspace_mut()
        .student_requests
        .get_or_insert_with(|| fixtures::student_requests(&student.user_id, &student.display_name));
    Ok(Json(list.clone()))
}

/// File a request to the administration
#[utoipa::path(
    post,
    path = "/api/student/requests",
    request_body = NewStudentRequest,
    responses(
        (status = 201, description = "Request filed", body = StudentRequest),
        (status = 400, description = "Missing subject or description"),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<NewStudentRequest>,
) -> Result<(StatusCode, Json<StudentRequest>)> {
    auth.require_role(Role::Student)?;
    if payload.subject.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Subject and description are required".to_string(),
        ));
    }
    let scope = auth.context.lock().scope()?;

    state
        .backend
        .submit_request(
            &scope.credential,
            payload.kind,
            &payload.subject,
            &payload.description,
            &scope.cancel,
        )
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let list = context
        .workspace_mut()
        .student_requests
        .get_or_insert_with(|| {
            fixtures::student_requests(&scope.session.user_id, &scope.session.display_name)
        });
    let request = requests::submit_request(list, &scope.session, payload, Utc::now())?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Search the shared document library
#[utoipa::path(
    get,
    path = "/api/student/library",
    params(LibraryQuery),
    responses(
        (status = 200, description = "Matching documents", body = Vec<LibraryDocument>),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn library(
    auth: AuthSession,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<Vec<LibraryDocument>>> {
    auth.require_role(Role::Student)?;
    Ok(Json(library::search_library(
        &fixtures::library_documents(),
        &query,
    )))
}

/// Certifications followed and available
#[utoipa::path(
    get,
    path = "/api/student/certifications",
    params(CertificationQuery),
    responses(
        (status = 200, description = "Enrolled courses and filtered catalog", body = StudentCertifications),
        (status = 403, description = "Not a student")
    ),
    tag = "student",
    security(("bearer" = []))
)]
pub async fn certifications(
    auth: AuthSession,
    Query(query): Query<CertificationQuery>,
) -> Result<Json<StudentCertifications>> {
    auth.require_role(Role::Student)?;
    let all = fixtures::certifications();

    Ok(Json(StudentCertifications {
        enrolled: certifications::enrolled(&all),
        catalog: certifications::filter_certifications(&all, &query),
    }))
}
