use crate::{
    auth::middleware::AuthSession,
    school::{
        accounts,
        overview::{self, AdminOverview},
        requests,
    },
    types::{
        AppError, NewUserAccount, PasswordResetResponse, RequestStatus, RequestUpdate, Result,
        Role, StudentRequest, UserAccount,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Matched against name and e-mail, case-insensitively.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestQuery {
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

async fn load_users(state: &AppState, auth: &AuthSession) -> Result<Vec<UserAccount>> {
    let cached = auth.context.lock().workspace().users.clone();
    if let Some(list) = cached {
        return Ok(list);
    }

    let scope = auth.context.lock().scope()?;
    let fetched = state
        .backend
        .fetch_all_users(&scope.credential, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    Ok(context
        .workspace_mut()
        .users
        .get_or_insert(fetched)
        .clone())
}

async fn load_requests(state: &AppState, auth: &AuthSession) -> Result<Vec<StudentRequest>> {
    let cached = auth.context.lock().workspace().requests.clone();
    if let Some(list) = cached {
        return Ok(list);
    }

    let scope = auth.context.lock().scope()?;
    let fetched = state
        .backend
        .fetch_all_requests(&scope.credential, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    Ok(context
        .workspace_mut()
        .requests
        .get_or_insert(fetched)
        .clone())
}

/// Administrator home page
///
/// Users and requests are fetched concurrently. A failed load is logged and
/// shows an empty dashboard.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Admin overview", body = AdminOverview),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<AdminOverview>> {
    auth.require_role(Role::Admin)?;

    let loaded = tokio::try_join!(load_users(&state, &auth), load_requests(&state, &auth));
    match loaded {
        Ok((users, requests)) => Ok(Json(overview::admin_overview(&users, &requests))),
        Err(AppError::Cancelled) => Err(AppError::Cancelled),
        Err(e) => {
            tracing::error!("Admin dashboard load failed for {}: {}", auth.claims.sub, e);
            Ok(Json(overview::admin_overview(&[], &[])))
        }
    }
}

/// User accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserQuery),
    responses(
        (status = 200, description = "Matching accounts", body = Vec<UserAccount>),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UserAccount>>> {
    auth.require_role(Role::Admin)?;
    let users = load_users(&state, &auth).await?;

    Ok(Json(accounts::filter_accounts(
        &users,
        query.search.as_deref().unwrap_or_default(),
        query.role,
    )))
}

/// Create a user account
///
/// Promotion is kept for students only and department for teachers only.
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = NewUserAccount,
    responses(
        (status = 201, description = "Account created", body = UserAccount),
        (status = 400, description = "Missing name or e-mail"),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<NewUserAccount>,
) -> Result<(StatusCode, Json<UserAccount>)> {
    auth.require_role(Role::Admin)?;
    let draft = accounts::normalize_new_account(payload)?;
    let loaded = load_users(&state, &auth).await?;
    let scope = auth.context.lock().scope()?;

    state
        .backend
        .create_user(&scope.credential, &draft, &scope.cancel)
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let users = context.workspace_mut().users.get_or_insert(loaded);
    let account = accounts::create_account(users, draft, Utc::now());

    tracing::info!(
        "Admin {} created {} account {}",
        scope.session.user_id,
        account.role,
        account.email
    );
    Ok((StatusCode::CREATED, Json(account)))
}

/// Reset a user's password
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/reset-password",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "New password", body = PasswordResetResponse),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(user_id): Path<String>,
) -> Result<Json<PasswordResetResponse>> {
    auth.require_role(Role::Admin)?;
    let scope = auth.context.lock().scope()?;

    let new_password = state
        .backend
        .reset_password(&scope.credential, &user_id, &scope.cancel)
        .await?;
    scope.ensure_live()?;

    Ok(Json(PasswordResetResponse {
        user_id,
        new_password,
    }))
}

/// Student requests
#[utoipa::path(
    get,
    path = "/api/admin/requests",
    params(RequestQuery),
    responses(
        (status = 200, description = "Requests", body = Vec<StudentRequest>),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<RequestQuery>,
) -> Result<Json<Vec<StudentRequest>>> {
    auth.require_role(Role::Admin)?;
    let all = load_requests(&state, &auth).await?;

    Ok(Json(
        all.into_iter()
            .filter(|r| query.status.is_none_or(|status| r.status == status))
            .collect(),
    ))
}

/// Answer a student request
#[utoipa::path(
    put,
    path = "/api/admin/requests/{id}",
    params(("id" = String, Path, description = "Request id")),
    request_body = RequestUpdate,
    responses(
        (status = 200, description = "Updated request", body = StudentRequest),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown request")
    ),
    tag = "admin",
    security(("bearer" = []))
)]
pub async fn update_request(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(request_id): Path<String>,
    Json(payload): Json<RequestUpdate>,
) -> Result<Json<StudentRequest>> {
    auth.require_role(Role::Admin)?;
    let all = load_requests(&state, &auth).await?;
    if !all.iter().any(|r| r.id == request_id) {
        return Err(AppError::NotFound(format!("Request {} not found", request_id)));
    }
    let scope = auth.context.lock().scope()?;

    state
        .backend
        .update_request_status(
            &scope.credential,
            &request_id,
            payload.status,
            &payload.response,
            &scope.cancel,
        )
        .await?;

    let mut context = auth.context.lock();
    scope.ensure_live()?;
    let live = context.workspace_mut().requests.get_or_insert(all);
    let updated = requests::update_request(live, &request_id, payload, Utc::now())?;

    Ok(Json(updated))
}
