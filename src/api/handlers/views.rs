use crate::{
    types::{ResolveViewRequest, Role},
    views::{route, PublicView, Screen},
};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolvedView {
    /// Stable screen identifier, e.g. `student/notes`.
    pub id: String,
    pub screen: Screen,
}

/// Resolve the screen for an arbitrary view state
///
/// Stateless: nothing about the caller's own session changes.
#[utoipa::path(
    post,
    path = "/api/views/resolve",
    request_body = ResolveViewRequest,
    responses(
        (status = 200, description = "Screen to render", body = ResolvedView)
    ),
    tag = "views"
)]
pub async fn resolve(Json(payload): Json<ResolveViewRequest>) -> Json<ResolvedView> {
    let role = payload.role.as_deref().and_then(Role::parse);
    let public_view = PublicView::parse(payload.public_view.as_deref());

    let screen = route(payload.authenticated, role, &payload.section, public_view);
    Json(ResolvedView {
        id: screen.id(),
        screen,
    })
}
