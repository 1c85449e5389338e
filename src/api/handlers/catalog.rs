use crate::{
    backend::fixtures,
    school::certifications::{filter_certifications, public_entry, CertificationQuery},
    types::Certification,
};
use axum::{extract::Query, Json};

/// Public certification catalog
///
/// Same courses the students see, without any enrolment or progress data.
#[utoipa::path(
    get,
    path = "/api/certifications",
    params(CertificationQuery),
    responses(
        (status = 200, description = "Certification catalog", body = Vec<Certification>)
    ),
    tag = "catalog"
)]
pub async fn list_certifications(Query(query): Query<CertificationQuery>) -> Json<Vec<Certification>> {
    let catalog = filter_certifications(&fixtures::certifications(), &query);
    Json(catalog.iter().map(public_entry).collect())
}
