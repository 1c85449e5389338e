//! User account management.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{AppError, NewUserAccount, Result, Role, UserAccount};

/// Accounts whose name or e-mail contains `search` (case-insensitive) and
/// whose role matches `role` when given.
pub fn filter_accounts(accounts: &[UserAccount], search: &str, role: Option<Role>) -> Vec<UserAccount> {
    let needle = search.trim().to_lowercase();

    accounts
        .iter()
        .filter(|a| {
            needle.is_empty()
                || a.name.to_lowercase().contains(&needle)
                || a.email.to_lowercase().contains(&needle)
        })
        .filter(|a| role.is_none_or(|r| a.role == r))
        .cloned()
        .collect()
}

/// Keeps only the fields that make sense for the account's role.
pub fn normalize_new_account(mut draft: NewUserAccount) -> Result<NewUserAccount> {
    if draft.name.trim().is_empty() || draft.email.trim().is_empty() {
        return Err(AppError::InvalidInput("Name and e-mail are required".to_string()));
    }

    draft.name = draft.name.trim().to_string();
    draft.email = draft.email.trim().to_string();
    if draft.role != Role::Student {
        draft.promotion = None;
    }
    if draft.role != Role::Teacher {
        draft.department = None;
    }
    Ok(draft)
}

/// Appends the account built from an already normalized draft.
pub fn create_account(
    accounts: &mut Vec<UserAccount>,
    draft: NewUserAccount,
    now: DateTime<Utc>,
) -> UserAccount {
    let account = UserAccount {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        email: draft.email,
        role: draft.role,
        promotion: draft.promotion,
        department: draft.department,
        created_at: now,
        is_active: draft.is_active,
    };
    accounts.push(account.clone());
    account
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    fn draft(role: Role) -> NewUserAccount {
        NewUserAccount {
            name: " Awa Ngono ".to_string(),
            email: "awa@example.com".to_string(),
            role,
            promotion: Some("L2 INFO".to_string()),
            department: Some("Mathématiques".to_string()),
            is_active: true,
        }
    }

    #[test]
    fn test_search_matches_name_or_email() {
        let accounts = fixtures::users();

        assert_eq!(filter_accounts(&accounts, "DJEUKENG", None).len(), 1);
        assert_eq!(filter_accounts(&accounts, "teacher@", None).len(), 1);
        assert_eq!(filter_accounts(&accounts, "example.com", None).len(), 2);
        assert_eq!(filter_accounts(&accounts, "", Some(Role::Teacher)).len(), 1);
        assert!(filter_accounts(&accounts, "example", Some(Role::Admin)).is_empty());
    }

    #[test]
    fn test_role_specific_fields() {
        let student = normalize_new_account(draft(Role::Student)).unwrap();
        assert_eq!(student.promotion.as_deref(), Some("L2 INFO"));
        assert_eq!(student.department, None);
        assert_eq!(student.name, "Awa Ngono");

        let teacher = normalize_new_account(draft(Role::Teacher)).unwrap();
        assert_eq!(teacher.promotion, None);
        assert_eq!(teacher.department.as_deref(), Some("Mathématiques"));

        let admin = normalize_new_account(draft(Role::Admin)).unwrap();
        assert_eq!(admin.promotion, None);
        assert_eq!(admin.department, None);
    }

    #[test]
    fn test_name_required() {
        let mut empty = draft(Role::Student);
        empty.name = "  ".to_string();
        assert!(matches!(normalize_new_account(empty), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_create_appends() {
        let mut accounts = fixtures::users();
        let draft = normalize_new_account(draft(Role::Student)).unwrap();
        let created = create_account(&mut accounts, draft, Utc::now());

        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[2], created);
    }
}
