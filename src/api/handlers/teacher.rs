use crate::{
    auth::middleware::AuthSession,
    school::{
        assignments,
        overview::{self, TeacherOverview},
    },
    types::{AppError, Assignment, GradeRequest, NewAssignment, Result, Role, Submission},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

const DEFAULT_MAX_POINTS: u32 = 20;

/// Teacher's assignments, fetched once per session.
async fn load_assignments(state: &AppState, auth: &AuthSession) -> Result<Vec<Assignment>> {
    let cached = auth.context.lock().workspace().teacher_assignments.clone();
    if let Some(list) = cached {
        return Ok(list);
    }

    let scope = auth.context.lock().scope()?;
    let fetched = state
        .backend
        .fetch_teacher_assignments(&scope.credential, &scope.session.user_id, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    Ok(context
        .workspace_mut()
        .teacher_assignments
        .get_or_insert(fetched)
        .clone())
}

/// Submissions for one assignment, fetched once per session.
async fn load_submissions(
    state: &AppState,
    auth: &AuthSession,
    assignment_id: &str,
) -> Result<Vec<Submission>> {
    let cached = auth
        .context
        .lock()
        .workspace()
        .submissions
        .get(assignment_id)
        .cloned();
    if let Some(list) = cached {
        return Ok(list);
    }

    let scope = auth.context.lock().scope()?;
    let fetched = state
        .backend
        .fetch_submissions(&scope.credential, assignment_id, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    Ok(context
        .workspace_mut()
        .submissions
        .entry(assignment_id.to_string())
        .or_insert(fetched)
        .clone())
}

/// Teacher home page
///
/// Counts are based on the submissions of the first assignment. A failed
/// load is logged and shows an empty dashboard.
#[utoipa::path(
    get,
    path = "/api/teacher/dashboard",
    responses(
        (status = 200, description = "Teacher overview", body = TeacherOverview),
        (status = 403, description = "Not a teacher")
    ),
    tag = "teacher",
    security(("bearer" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<TeacherOverview>> {
    auth.require_role(Role::Teacher)?;

    let loaded = async {
        let assignments = load_assignments(&state, &auth).await?;
        let submissions = match assignments.first() {
            Some(first) => load_submissions(&state, &auth, &first.id).await?,
            None => Vec::new(),
        };
        Ok::<_, AppError>((assignments, submissions))
    }
    .await;

    match loaded {
        Ok((assignments, submissions)) => {
            Ok(Json(overview::teacher_overview(&assignments, &submissions)))
        }
        Err(AppError::Cancelled) => Err(AppError::Cancelled),
        Err(e) => {
            tracing::error!("Teacher dashboard load failed for {}: {}", auth.claims.sub, e);
            Ok(Json(overview::teacher_overview(&[], &[])))
        }
    }
}

/// Assignments published by the teacher
#[utoipa::path(
    get,
    path = "/api/teacher/assignments",
    responses(
        (status = 200, description = "Assignments", body = Vec<Assignment>),
        (status = 403, description = "Not a teacher")
    ),
    tag = "teacher",
    security(("bearer" = []))
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<Vec<Assignment>>> {
    auth.require_role(Role::Teacher)?;
    Ok(Json(load_assignments(&state, &auth).await?))
}

/// Publish a new assignment
///
/// The assignment is also added to the session's assignment cache, which is
/// merged into student assignment lists of the same promotion.
#[utoipa::path(
    post,
    path = "/api/teacher/assignments",
    request_body = NewAssignment,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 400, description = "Invalid assignment"),
        (status = 403, description = "Not a teacher")
    ),
    tag = "teacher",
    security(("bearer" = []))
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<NewAssignment>,
) -> Result<(StatusCode, Json<Assignment>)> {
    auth.require_role(Role::Teacher)?;
    let listed = load_assignments(&state, &auth).await?;
    let scope = auth.context.lock().scope()?;
    let assignment = assignments::new_assignment(&scope.session, payload.clone())?;

    state
        .backend
        .create_assignment(&scope.credential, &payload, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let workspace = context.workspace_mut();
    workspace
        .teacher_assignments
        .get_or_insert(listed)
        .push(assignment.clone());
    workspace.assignment_cache.push(assignment.clone());

    tracing::info!(
        "Teacher {} published assignment '{}' for {}",
        scope.session.user_id,
        assignment.title,
        assignment.promotion
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Hand-ins for one assignment
#[utoipa::path(
    get,
    path = "/api/teacher/assignments/{id}/submissions",
    params(("id" = String, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Submissions", body = Vec<Submission>),
        (status = 403, description = "Not a teacher")
    ),
    tag = "teacher",
    security(("bearer" = []))
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(assignment_id): Path<String>,
) -> Result<Json<Vec<Submission>>> {
    auth.require_role(Role::Teacher)?;
    Ok(Json(load_submissions(&state, &auth, &assignment_id).await?))
}

/// Grade a submission
///
/// The submission must have been listed in this session. The grade has to
/// lie between 0 and the assignment's maximum.
#[utoipa::path(
    post,
    path = "/api/teacher/submissions/{id}/grade",
    params(("id" = String, Path, description = "Submission id")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Graded submission", body = Submission),
        (status = 400, description = "Grade out of range or ambiguous submission id"),
        (status = 403, description = "Not a teacher"),
        (status = 404, description = "Unknown submission")
    ),
    tag = "teacher",
    security(("bearer" = []))
)]
pub async fn grade_submission(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(submission_id): Path<String>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<Submission>> {
    auth.require_role(Role::Teacher)?;

    let (scope, assignment_id, max_points) = {
        let context = auth.context.lock();
        let workspace = context.workspace();
        let mut owners = workspace
            .submissions
            .iter()
            .filter(|(_, list)| list.iter().any(|s| s.id == submission_id))
            .map(|(id, _)| id.clone());
        let assignment_id = owners
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", submission_id)))?;
        if owners.next().is_some() {
            return Err(AppError::InvalidInput(format!(
                "Submission {} belongs to more than one assignment",
                submission_id
            )));
        }
        let max_points = workspace
            .teacher_assignments
            .iter()
            .flatten()
            .find(|a| a.id == assignment_id)
            .map(|a| a.max_points)
            .unwrap_or(DEFAULT_MAX_POINTS);
        (context.scope()?, assignment_id, max_points)
    };
    assignments::validate_grade(payload.grade, max_points)?;

    state
        .backend
        .grade_submission(
            &scope.credential,
            &submission_id,
            payload.grade,
            &payload.feedback,
            &scope.cancel,
        )
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let list = context
        .workspace_mut()
        .submissions
        .entry(assignment_id)
        .or_default();
    let graded = assignments::apply_grade(
        list,
        &submission_id,
        payload.grade,
        &payload.feedback,
        max_points,
    )?;

    Ok(Json(graded))
}
