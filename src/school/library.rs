//! Shared document library.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::types::{DocumentCategory, DocumentKind, LibraryDocument};

/// Library search; every criterion is optional.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LibraryQuery {
    /// Matched against title, author and tags, case-insensitively.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
    #[serde(default)]
    pub kind: Option<DocumentKind>,
}

impl LibraryQuery {
    pub fn matches(&self, document: &LibraryDocument) -> bool {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let matches_search = needle.is_empty()
            || document.title.to_lowercase().contains(&needle)
            || document.author.to_lowercase().contains(&needle)
            || document
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));

        matches_search
            && self.category.is_none_or(|c| document.category == c)
            && self.kind.is_none_or(|k| document.kind == k)
    }
}

pub fn search_library(documents: &[LibraryDocument], query: &LibraryQuery) -> Vec<LibraryDocument> {
    documents.iter().filter(|d| query.matches(d)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    fn search(term: &str) -> LibraryQuery {
        LibraryQuery {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_fields() {
        let documents = fixtures::library_documents();

        // title
        assert_eq!(search_library(&documents, &search("stage")).len(), 1);
        // author
        assert_eq!(search_library(&documents, &search("sophie")).len(), 1);
        // tag
        assert_eq!(search_library(&documents, &search("MYSQL")).len(), 1);
        assert_eq!(search_library(&documents, &LibraryQuery::default()).len(), 5);
    }

    #[test]
    fn test_category_and_kind_filters() {
        let documents = fixtures::library_documents();

        let courses = LibraryQuery {
            category: Some(DocumentCategory::Cours),
            ..Default::default()
        };
        assert_eq!(search_library(&documents, &courses).len(), 2);

        let pdf_exercises = LibraryQuery {
            search: Some("exercices".to_string()),
            kind: Some(DocumentKind::Pdf),
            ..Default::default()
        };
        let found = search_library(&documents, &pdf_exercises);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");
    }
}
