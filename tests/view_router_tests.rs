use rstest::rstest;

use campus::types::Role;
use campus::views::{route, PublicView, Screen, ViewState, DEFAULT_SECTION};

#[rstest]
#[case(Role::Student, "notes", "student/notes")]
#[case(Role::Student, "schedule", "student/schedule")]
#[case(Role::Student, "stats", "student/stats")]
#[case(Role::Student, "grading", "student/dashboard")]
#[case(Role::Student, "users", "student/dashboard")]
#[case(Role::Teacher, "grading", "teacher/grading")]
#[case(Role::Teacher, "students", "teacher/students")]
#[case(Role::Teacher, "notes", "teacher/dashboard")]
#[case(Role::Admin, "users", "admin/users")]
#[case(Role::Admin, "requests", "admin/requests")]
#[case(Role::Admin, "library", "admin/dashboard")]
#[case(Role::Admin, "", "admin/dashboard")]
#[case(Role::Admin, "Users", "admin/dashboard")]
fn test_authenticated_routing(#[case] role: Role, #[case] section: &str, #[case] expected: &str) {
    let screen = route(true, Some(role), section, PublicView::Landing);

    assert_eq!(screen.id(), expected);
    assert!(screen.is_dashboard());
}

#[rstest]
#[case(PublicView::Landing, Screen::Landing)]
#[case(PublicView::Certifications, Screen::CertificationsCatalog)]
#[case(PublicView::Login, Screen::Login)]
fn test_unauthenticated_routing(#[case] view: PublicView, #[case] expected: Screen) {
    for role in [None, Some(Role::Student), Some(Role::Admin)] {
        assert_eq!(route(false, role, "notes", view), expected);
    }
}

#[test]
fn test_authenticated_without_role_shows_landing() {
    assert_eq!(
        route(true, None, "notes", PublicView::Certifications),
        Screen::Landing
    );
}

#[rstest]
#[case(Some("certifications"), PublicView::Certifications)]
#[case(Some("certifications-catalog"), PublicView::Certifications)]
#[case(Some(" LOGIN "), PublicView::Login)]
#[case(Some("landing"), PublicView::Landing)]
#[case(Some("somewhere"), PublicView::Landing)]
#[case(None, PublicView::Landing)]
fn test_public_view_parsing(#[case] value: Option<&str>, #[case] expected: PublicView) {
    assert_eq!(PublicView::parse(value), expected);
}

#[test]
fn test_every_menu_entry_routes_to_itself() {
    for role in [Role::Student, Role::Teacher, Role::Admin] {
        for section in role.sections() {
            let screen = route(true, Some(role), section, PublicView::Landing);
            assert_eq!(screen.section(), Some(*section));
        }
    }
}

#[test]
fn test_view_state_lifecycle() {
    let mut view = ViewState::default();
    assert_eq!(view.screen(), Screen::Landing);
    assert_eq!(
        view.show_public(PublicView::Certifications),
        Screen::CertificationsCatalog
    );

    let mut view = ViewState::signed_in(Role::Teacher);
    assert_eq!(view.active_section, DEFAULT_SECTION);

    view.navigate("grading");
    assert_eq!(view.active_section, "grading");

    view.navigate("notes");
    assert_eq!(view.active_section, DEFAULT_SECTION);

    view.reset();
    assert!(!view.authenticated);
    assert_eq!(view.role, None);
    assert_eq!(view.screen(), Screen::Landing);
}
