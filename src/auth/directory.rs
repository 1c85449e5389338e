use crate::types::{AppError, Result, Role, UserProfile};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password";

/// Message returned for any credential mismatch.
pub const INVALID_CREDENTIALS: &str = "Email ou mot de passe incorrect";

/// Fixed set of demo accounts the portal accepts.
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    accounts: Vec<UserProfile>,
}

impl Default for CredentialDirectory {
    fn default() -> Self {
        Self::new(vec![
            UserProfile {
                id: "1".to_string(),
                name: "Djeukeng Kana".to_string(),
                email: "student@example.com".to_string(),
                role: Role::Student,
                promotion: Some("L3 RT".to_string()),
                department: None,
                avatar: Some("https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=200&h=200&dpr=2".to_string()),
            },
            UserProfile {
                id: "2".to_string(),
                name: "M. Atemengue".to_string(),
                email: "teacher@example.com".to_string(),
                role: Role::Teacher,
                promotion: None,
                department: Some("Informatique".to_string()),
                avatar: Some("https://images.pexels.com/photos/1222271/pexels-photo-1222271.jpeg?auto=compress&cs=tinysrgb&w=200&h=200&dpr=2".to_string()),
            },
            UserProfile {
                id: "3".to_string(),
                name: "Admin Système".to_string(),
                email: "admin@example.com".to_string(),
                role: Role::Admin,
                promotion: None,
                department: None,
                avatar: Some("https://images.pexels.com/photos/1043471/pexels-photo-1043471.jpeg?auto=compress&cs=tinysrgb&w=200&h=200&dpr=2".to_string()),
            },
        ])
    }
}

impl CredentialDirectory {
    pub fn new(accounts: Vec<UserProfile>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[UserProfile] {
        &self.accounts
    }

    /// Returns the profile for `email` when `password` matches.
    ///
    /// The e-mail is trimmed, then compared exactly. Every failure yields the
    /// same message so callers cannot tell which half was wrong.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile> {
        let email = email.trim();

        if password != DEMO_PASSWORD {
            tracing::debug!("Login rejected for {}: wrong password", email);
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        self.accounts
            .iter()
            .find(|account| account.email == email)
            .cloned()
            .ok_or_else(|| {
                tracing::debug!("Login rejected: unknown e-mail {}", email);
                AppError::Auth(INVALID_CREDENTIALS.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_authenticate() {
        let directory = CredentialDirectory::default();

        let student = directory
            .authenticate("student@example.com", "password")
            .unwrap();
        assert_eq!(student.id, "1");
        assert_eq!(student.role, Role::Student);
        assert_eq!(student.promotion.as_deref(), Some("L3 RT"));

        let teacher = directory
            .authenticate("teacher@example.com", "password")
            .unwrap();
        assert_eq!(teacher.name, "M. Atemengue");
        assert_eq!(teacher.department.as_deref(), Some("Informatique"));

        let admin = directory.authenticate("admin@example.com", "password").unwrap();
        assert_eq!(admin.id, "3");
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_email_is_trimmed_but_case_sensitive() {
        let directory = CredentialDirectory::default();

        assert!(directory
            .authenticate("  admin@example.com ", "password")
            .is_ok());
        assert!(directory
            .authenticate("Admin@example.com", "password")
            .is_err());
    }

    #[test]
    fn test_failures_share_one_message() {
        let directory = CredentialDirectory::default();

        for (email, password) in [
            ("student@example.com", "wrong"),
            ("nobody@example.com", "password"),
            ("", ""),
        ] {
            match directory.authenticate(email, password) {
                Err(AppError::Auth(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
                other => panic!("expected auth error, got {:?}", other),
            }
        }
    }
}
