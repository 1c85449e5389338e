//! Role-based view routing
//!
//! Maps an authentication state, a role and a requested section to the
//! [`Screen`] the portal should show. Each role has a fixed allow-list of
//! dashboard sections; anything outside it silently falls back to
//! `dashboard`. While unauthenticated, only the public views are reachable.
//!
//! # Example
//!
//! ```
//! use campus::types::Role;
//! use campus::views::{route, PublicView, Screen, StudentSection};
//!
//! let screen = route(true, Some(Role::Student), "notes", PublicView::Landing);
//! assert_eq!(screen, Screen::Student { section: StudentSection::Notes });
//!
//! let screen = route(true, Some(Role::Admin), "grading", PublicView::Landing);
//! assert_eq!(screen.id(), "admin/dashboard");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::Role;

/// Section every role falls back to.
pub const DEFAULT_SECTION: &str = "dashboard";

macro_rules! sections {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every section of this dashboard, in menu order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Menu keys, in menu order.
            pub const KEYS: &'static [&'static str] = &[$($key),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

sections! {
    /// Sections of the student dashboard.
    StudentSection {
        Dashboard => "dashboard",
        Notes => "notes",
        Schedule => "schedule",
        Assignments => "assignments",
        Bulletin => "bulletin",
        Library => "library",
        Certifications => "certifications",
        Requests => "requests",
        Notifications => "notifications",
        Profile => "profile",
        Stats => "stats",
        Settings => "settings",
    }
}

sections! {
    /// Sections of the teacher dashboard.
    TeacherSection {
        Dashboard => "dashboard",
        Assignments => "assignments",
        Grading => "grading",
        Bulletin => "bulletin",
        Students => "students",
        Profile => "profile",
    }
}

sections! {
    /// Sections of the admin dashboard.
    AdminSection {
        Dashboard => "dashboard",
        Users => "users",
        Requests => "requests",
        Profile => "profile",
        Settings => "settings",
    }
}

impl Role {
    /// Allow-listed section keys for this role.
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            Role::Student => StudentSection::KEYS,
            Role::Teacher => TeacherSection::KEYS,
            Role::Admin => AdminSection::KEYS,
        }
    }

    pub fn allows(self, section: &str) -> bool {
        self.sections().contains(&section)
    }

    /// Dashboard screen for `section`, or the role's dashboard home when the
    /// section is not on its menu.
    pub fn dashboard(self, section: &str) -> Screen {
        match self {
            Role::Student => Screen::Student {
                section: StudentSection::from_key(section).unwrap_or(StudentSection::Dashboard),
            },
            Role::Teacher => Screen::Teacher {
                section: TeacherSection::from_key(section).unwrap_or(TeacherSection::Dashboard),
            },
            Role::Admin => Screen::Admin {
                section: AdminSection::from_key(section).unwrap_or(AdminSection::Dashboard),
            },
        }
    }
}

/// Public navigation target used while nobody is signed in.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublicView {
    #[default]
    Landing,
    Certifications,
    Login,
}

impl PublicView {
    /// Unknown or missing values land on the landing page.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("certifications") | Some("certifications-catalog") => PublicView::Certifications,
            Some("login") => PublicView::Login,
            _ => PublicView::Landing,
        }
    }
}

/// A top-level screen of the portal.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Screen {
    Landing,
    CertificationsCatalog,
    Login,
    Student { section: StudentSection },
    Teacher { section: TeacherSection },
    Admin { section: AdminSection },
}

impl Screen {
    /// Stable identifier, e.g. `landing` or `teacher/grading`.
    pub fn id(&self) -> String {
        match self {
            Screen::Landing => "landing".to_string(),
            Screen::CertificationsCatalog => "certifications-catalog".to_string(),
            Screen::Login => "login".to_string(),
            Screen::Student { section } => format!("student/{}", section.key()),
            Screen::Teacher { section } => format!("teacher/{}", section.key()),
            Screen::Admin { section } => format!("admin/{}", section.key()),
        }
    }

    /// Dashboard section key, if this is a dashboard screen.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Screen::Student { section } => Some(section.key()),
            Screen::Teacher { section } => Some(section.key()),
            Screen::Admin { section } => Some(section.key()),
            Screen::Landing | Screen::CertificationsCatalog | Screen::Login => None,
        }
    }

    pub fn is_dashboard(&self) -> bool {
        self.section().is_some()
    }
}

/// Selects the screen to render.
///
/// The requested section is ignored while unauthenticated. An authenticated
/// state without a recognized role has no dashboard and renders the landing
/// page.
pub fn route(
    authenticated: bool,
    role: Option<Role>,
    requested_section: &str,
    public_view: PublicView,
) -> Screen {
    if !authenticated {
        return match public_view {
            PublicView::Landing => Screen::Landing,
            PublicView::Certifications => Screen::CertificationsCatalog,
            PublicView::Login => Screen::Login,
        };
    }

    let Some(role) = role else {
        tracing::debug!("Authenticated view without a role, rendering landing");
        return Screen::Landing;
    };

    if !role.allows(requested_section) {
        tracing::debug!(
            "Section '{}' is not on the {} menu, falling back to {}",
            requested_section,
            role,
            DEFAULT_SECTION
        );
    }

    role.dashboard(requested_section)
}

/// Section key the router will actually show for `role`.
pub fn normalize_section(role: Role, section: &str) -> &'static str {
    role.dashboard(section).section().unwrap_or(DEFAULT_SECTION)
}

/// What the current client is looking at.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub active_section: String,
    pub public_view: PublicView,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            authenticated: false,
            role: None,
            active_section: DEFAULT_SECTION.to_string(),
            public_view: PublicView::Landing,
        }
    }
}

impl ViewState {
    /// Fresh view for a user who just signed in.
    pub fn signed_in(role: Role) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
            active_section: DEFAULT_SECTION.to_string(),
            public_view: PublicView::Landing,
        }
    }

    pub fn screen(&self) -> Screen {
        route(
            self.authenticated,
            self.role,
            &self.active_section,
            self.public_view,
        )
    }

    /// Moves to `section`, keeping `active_section` on the role's menu.
    pub fn navigate(&mut self, section: &str) -> Screen {
        self.active_section = match self.role {
            Some(role) => normalize_section(role, section).to_string(),
            None => DEFAULT_SECTION.to_string(),
        };
        self.screen()
    }

    pub fn show_public(&mut self, view: PublicView) -> Screen {
        self.public_view = view;
        self.screen()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_ignores_section() {
        assert_eq!(
            route(false, Some(Role::Student), "notes", PublicView::Landing),
            Screen::Landing
        );
        assert_eq!(
            route(false, None, "notes", PublicView::Certifications),
            Screen::CertificationsCatalog
        );
        assert_eq!(route(false, None, "", PublicView::Login), Screen::Login);
    }

    #[test]
    fn test_authenticated_without_role_lands() {
        assert_eq!(route(true, None, "notes", PublicView::Login), Screen::Landing);
    }

    #[test]
    fn test_allowed_sections_route_to_themselves() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            for key in role.sections() {
                let screen = route(true, Some(role), key, PublicView::Landing);
                assert_eq!(screen.section(), Some(*key), "{} / {}", role, key);
            }
        }
    }

    #[test]
    fn test_foreign_section_falls_back() {
        let screen = route(true, Some(Role::Teacher), "notes", PublicView::Landing);
        assert_eq!(
            screen,
            Screen::Teacher {
                section: TeacherSection::Dashboard
            }
        );
    }

    #[test]
    fn test_section_lists() {
        assert_eq!(Role::Student.sections().len(), 12);
        assert_eq!(
            Role::Teacher.sections(),
            &["dashboard", "assignments", "grading", "bulletin", "students", "profile"]
        );
        assert_eq!(
            Role::Admin.sections(),
            &["dashboard", "users", "requests", "profile", "settings"]
        );
    }

    #[test]
    fn test_screen_ids() {
        assert_eq!(Screen::Landing.id(), "landing");
        assert_eq!(Screen::CertificationsCatalog.id(), "certifications-catalog");
        assert_eq!(
            Screen::Admin {
                section: AdminSection::Users
            }
            .id(),
            "admin/users"
        );
    }

    #[test]
    fn test_public_view_parse() {
        assert_eq!(PublicView::parse(None), PublicView::Landing);
        assert_eq!(PublicView::parse(Some("login")), PublicView::Login);
        assert_eq!(
            PublicView::parse(Some("Certifications")),
            PublicView::Certifications
        );
        assert_eq!(PublicView::parse(Some("dashboard")), PublicView::Landing);
    }

    #[test]
    fn test_navigate_keeps_section_on_menu() {
        let mut view = ViewState::signed_in(Role::Admin);
        assert_eq!(view.navigate("users").id(), "admin/users");
        assert_eq!(view.active_section, "users");

        assert_eq!(view.navigate("library").id(), "admin/dashboard");
        assert_eq!(view.active_section, "dashboard");
    }

    #[test]
    fn test_reset_returns_to_landing() {
        let mut view = ViewState::signed_in(Role::Student);
        view.navigate("notes");
        view.reset();

        assert_eq!(view, ViewState::default());
        assert_eq!(view.screen(), Screen::Landing);
    }

    #[test]
    fn test_screen_serialization_is_tagged() {
        let json = serde_json::to_value(Screen::Student {
            section: StudentSection::Notes,
        })
        .unwrap();
        assert_eq!(json["kind"], "student");
        assert_eq!(json["section"], "notes");
    }
}
