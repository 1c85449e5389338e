use crate::{
    auth::middleware::AuthSession,
    backend::fixtures,
    school::bulletin::{self, BulletinBoard},
    types::{BulletinKind, BulletinPost, NewBulletinPost, Result},
};
use axum::{extract::Query, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BulletinQuery {
    #[serde(default)]
    pub kind: Option<BulletinKind>,
}

/// Bulletin board, pinned posts first
#[utoipa::path(
    get,
    path = "/api/bulletin",
    params(BulletinQuery),
    responses(
        (status = 200, description = "Bulletin board", body = BulletinBoard),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bulletin",
    security(("bearer" = []))
)]
pub async fn list_posts(
    auth: AuthSession,
    Query(query): Query<BulletinQuery>,
) -> Json<BulletinBoard> {
    let mut context = auth.context.lock();
    let posts = context
        .workspace_mut()
        .bulletin
        .get_or_insert_with(fixtures::bulletin_posts);

    Json(bulletin::board(posts, query.kind))
}

/// Publish a post (teachers and administrators)
#[utoipa::path(
    post,
    path = "/api/bulletin",
    request_body = NewBulletinPost,
    responses(
        (status = 201, description = "Post published", body = BulletinPost),
        (status = 400, description = "Missing title or content"),
        (status = 403, description = "Students cannot publish")
    ),
    tag = "bulletin",
    security(("bearer" = []))
)]
pub async fn publish_post(
    auth: AuthSession,
    Json(payload): Json<NewBulletinPost>,
) -> Result<(StatusCode, Json<BulletinPost>)> {
    let mut context = auth.context.lock();
    let author = context.require_session()?.clone();
    let posts = context
        .workspace_mut()
        .bulletin
        .get_or_insert_with(fixtures::bulletin_posts);

    let post = bulletin::publish(posts, &author, payload, Utc::now())?;
    Ok((StatusCode::CREATED, Json(post)))
}
