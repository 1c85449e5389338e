//! Dashboard home pages for each role.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::grades::{format_grade, weighted_average};
use super::schedule::classes_on;
use crate::types::{
    Assignment, AssignmentStatus, Note, RequestStatus, Role, ScheduleItem, StudentRequest,
    Submission, UserAccount,
};

/// Target average shown on every student dashboard.
pub const STUDENT_OBJECTIVE: &str = "16/20";

const RECENT_NOTES: usize = 4;
const RECENT_TEACHER_ITEMS: usize = 3;
const RECENT_ADMIN_ITEMS: usize = 5;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct StudentOverview {
    /// Weighted average, formatted as `15.5/20`.
    pub average: String,
    pub subjects: usize,
    pub today_classes: Vec<ScheduleItem>,
    pub objective: String,
    pub recent_notes: Vec<Note>,
    pub loading: bool,
}

pub fn student_overview(notes: &[Note], schedule: &[ScheduleItem], today: NaiveDate) -> StudentOverview {
    let subjects: HashSet<&str> = notes.iter().map(|n| n.course.as_str()).collect();

    StudentOverview {
        average: format_grade(weighted_average(notes)),
        subjects: subjects.len(),
        today_classes: classes_on(schedule, today),
        objective: STUDENT_OBJECTIVE.to_string(),
        recent_notes: notes.iter().take(RECENT_NOTES).cloned().collect(),
        loading: false,
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TeacherOverview {
    pub active_assignments: usize,
    pub submissions: usize,
    pub pending: usize,
    pub graded: usize,
    pub recent_assignments: Vec<Assignment>,
    pub recent_submissions: Vec<Submission>,
    pub loading: bool,
}

pub fn teacher_overview(assignments: &[Assignment], submissions: &[Submission]) -> TeacherOverview {
    let graded = submissions.iter().filter(|s| s.grade.is_some()).count();

    TeacherOverview {
        active_assignments: assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Active)
            .count(),
        submissions: submissions.len(),
        pending: submissions.len() - graded,
        graded,
        recent_assignments: assignments.iter().take(RECENT_TEACHER_ITEMS).cloned().collect(),
        recent_submissions: submissions.iter().take(RECENT_TEACHER_ITEMS).cloned().collect(),
        loading: false,
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct AdminOverview {
    pub total_users: usize,
    pub students: usize,
    pub teachers: usize,
    pub pending_requests: usize,
    pub recent_users: Vec<UserAccount>,
    pub recent_requests: Vec<StudentRequest>,
    pub loading: bool,
}

pub fn admin_overview(users: &[UserAccount], requests: &[StudentRequest]) -> AdminOverview {
    let count_role = |role: Role| users.iter().filter(|u| u.role == role).count();

    AdminOverview {
        total_users: users.len(),
        students: count_role(Role::Student),
        teachers: count_role(Role::Teacher),
        pending_requests: requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .count(),
        recent_users: users.iter().take(RECENT_ADMIN_ITEMS).cloned().collect(),
        recent_requests: requests.iter().take(RECENT_ADMIN_ITEMS).cloned().collect(),
        loading: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    #[test]
    fn test_student_overview() {
        let notes = fixtures::notes("1");
        let schedule = fixtures::schedule("L3 RT");
        let monday = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();

        let overview = student_overview(&notes, &schedule, monday);

        assert_eq!(overview.average, "15.5/20");
        assert_eq!(overview.subjects, 5);
        assert_eq!(overview.today_classes.len(), 3);
        assert_eq!(overview.objective, "16/20");
        assert_eq!(overview.recent_notes.len(), 4);
        assert!(!overview.loading);
    }

    #[test]
    fn test_student_overview_without_data() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let overview = student_overview(&[], &[], today);

        assert_eq!(overview.average, "0.0/20");
        assert_eq!(overview.subjects, 0);
        assert!(overview.today_classes.is_empty());
    }

    #[test]
    fn test_teacher_overview_counts() {
        let assignments = fixtures::teacher_assignments("2");
        let mut submissions = fixtures::submissions("1");
        submissions.push(Submission {
            id: "2".to_string(),
            grade: Some(14.0),
            ..submissions[0].clone()
        });

        let overview = teacher_overview(&assignments, &submissions);

        assert_eq!(overview.active_assignments, 1);
        assert_eq!(overview.submissions, 2);
        assert_eq!(overview.pending, 1);
        assert_eq!(overview.graded, 1);
    }

    #[test]
    fn test_admin_overview_counts() {
        let overview = admin_overview(&fixtures::users(), &fixtures::requests());

        assert_eq!(overview.total_users, 2);
        assert_eq!(overview.students, 1);
        assert_eq!(overview.teachers, 1);
        assert_eq!(overview.pending_requests, 1);
    }
}
