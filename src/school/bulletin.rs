//! Digital bulletin board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::session::Session;
use crate::types::{AppError, BulletinKind, BulletinPost, NewBulletinPost, Result, Role};

/// Posts split the way the board shows them: pinned first.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct BulletinBoard {
    pub pinned: Vec<BulletinPost>,
    pub regular: Vec<BulletinPost>,
}

/// Posts of one kind, or all of them, in board order.
pub fn filter_posts(posts: &[BulletinPost], kind: Option<BulletinKind>) -> Vec<BulletinPost> {
    posts
        .iter()
        .filter(|p| kind.is_none_or(|k| p.kind == k))
        .cloned()
        .collect()
}

pub fn board(posts: &[BulletinPost], kind: Option<BulletinKind>) -> BulletinBoard {
    let (pinned, regular) = filter_posts(posts, kind)
        .into_iter()
        .partition(|p| p.is_pinned);
    BulletinBoard { pinned, regular }
}

/// Publishes a post at the top of the board.
///
/// The author is the signed-in user. Students cannot publish.
pub fn publish(
    posts: &mut Vec<BulletinPost>,
    author: &Session,
    draft: NewBulletinPost,
    now: DateTime<Utc>,
) -> Result<BulletinPost> {
    if author.role == Role::Student {
        return Err(AppError::Forbidden(
            "Students cannot publish on the bulletin board".to_string(),
        ));
    }
    if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Title and content are required".to_string(),
        ));
    }

    let post = BulletinPost {
        id: Uuid::new_v4().to_string(),
        title: draft.title.trim().to_string(),
        content: draft.content,
        kind: draft.kind,
        author: author.display_name.clone(),
        author_role: author.role,
        published_at: now,
        promotion: draft.promotion,
        is_pinned: draft.is_pinned,
        attachments: Vec::new(),
        views: 0,
    };

    tracing::info!("{} published '{}' on the bulletin board", post.author, post.title);
    posts.insert(0, post.clone());
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::CredentialDirectory;
    use crate::backend::fixtures;
    use crate::session::PortalContext;

    fn session(email: &str) -> Session {
        let mut context = PortalContext::new();
        context
            .login(&CredentialDirectory::default(), email, "password")
            .unwrap()
            .clone()
    }

    fn draft(title: &str) -> NewBulletinPost {
        NewBulletinPost {
            title: title.to_string(),
            content: "Salle B205".to_string(),
            kind: BulletinKind::Event,
            promotion: "L3 RT".to_string(),
            is_pinned: false,
        }
    }

    #[test]
    fn test_board_splits_pinned() {
        let board = board(&fixtures::bulletin_posts(), None);
        assert_eq!(board.pinned.len(), 2);
        assert_eq!(board.regular.len(), 3);
    }

    #[test]
    fn test_filter_by_kind() {
        let posts = fixtures::bulletin_posts();
        assert_eq!(filter_posts(&posts, Some(BulletinKind::ExamResults)).len(), 2);
        assert_eq!(filter_posts(&posts, Some(BulletinKind::Urgent)).len(), 1);
    }

    #[test]
    fn test_publish_prepends_with_author() {
        let mut posts = fixtures::bulletin_posts();
        let post = publish(&mut posts, &session("teacher@example.com"), draft("Soutenance"), Utc::now())
            .unwrap();

        assert_eq!(posts.len(), 6);
        assert_eq!(posts[0].id, post.id);
        assert_eq!(post.author, "M. Atemengue");
        assert_eq!(post.author_role, Role::Teacher);
        assert_eq!(post.views, 0);
    }

    #[test]
    fn test_students_cannot_publish() {
        let mut posts = Vec::new();
        let result = publish(&mut posts, &session("student@example.com"), draft("x"), Utc::now());

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(posts.is_empty());
    }

    #[test]
    fn test_title_required() {
        let mut posts = Vec::new();
        let result = publish(&mut posts, &session("admin@example.com"), draft("  "), Utc::now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
