//! Certification catalog.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::types::{Certification, CertificationLevel};

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CertificationQuery {
    /// Catalog category, e.g. `web`, `data`, `mobile`, `security`.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<CertificationLevel>,
}

pub fn filter_certifications(
    certifications: &[Certification],
    query: &CertificationQuery,
) -> Vec<Certification> {
    certifications
        .iter()
        .filter(|c| {
            query
                .category
                .as_deref()
                .is_none_or(|category| category == "all" || c.category == category)
        })
        .filter(|c| query.level.is_none_or(|level| c.level == level))
        .cloned()
        .collect()
}

/// Courses the student is following.
pub fn enrolled(certifications: &[Certification]) -> Vec<Certification> {
    certifications
        .iter()
        .filter(|c| c.is_enrolled)
        .cloned()
        .collect()
}

/// Public catalog entry: no per-student progress.
pub fn public_entry(certification: &Certification) -> Certification {
    Certification {
        progress: None,
        is_enrolled: false,
        completed_lessons: None,
        certificate: false,
        ..certification.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    #[test]
    fn test_filters() {
        let catalog = fixtures::certifications();

        let data = CertificationQuery {
            category: Some("data".to_string()),
            level: None,
        };
        assert_eq!(filter_certifications(&catalog, &data).len(), 2);

        let advanced_data = CertificationQuery {
            category: Some("data".to_string()),
            level: Some(CertificationLevel::Advanced),
        };
        assert_eq!(filter_certifications(&catalog, &advanced_data).len(), 1);

        let all = CertificationQuery {
            category: Some("all".to_string()),
            level: None,
        };
        assert_eq!(filter_certifications(&catalog, &all).len(), 5);
    }

    #[test]
    fn test_enrolled() {
        let enrolled = enrolled(&fixtures::certifications());
        let ids: Vec<_> = enrolled.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_public_entry_hides_progress() {
        let catalog = fixtures::certifications();
        let entry = public_entry(&catalog[1]);

        assert_eq!(entry.progress, None);
        assert!(!entry.is_enrolled);
        assert!(!entry.certificate);
        assert_eq!(entry.title, catalog[1].title);
    }
}
