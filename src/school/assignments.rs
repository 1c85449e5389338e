//! Assignments, hand-ins and grading.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::session::Session;
use crate::types::{
    AppError, Assignment, AssignmentStatus, FileSubmission, NewAssignment, Result, Submission,
    SubmissionUpload,
};

/// Builds a new active assignment owned by `teacher`.
pub fn new_assignment(teacher: &Session, draft: NewAssignment) -> Result<Assignment> {
    if draft.title.trim().is_empty() || draft.course.trim().is_empty() {
        return Err(AppError::InvalidInput("Title and course are required".to_string()));
    }
    if draft.promotion.trim().is_empty() {
        return Err(AppError::InvalidInput("Promotion is required".to_string()));
    }
    if draft.max_points == 0 {
        return Err(AppError::InvalidInput("Max points must be positive".to_string()));
    }

    Ok(Assignment {
        id: Uuid::new_v4().to_string(),
        title: draft.title.trim().to_string(),
        description: draft.description,
        due_date: draft.due_date,
        course: draft.course.trim().to_string(),
        teacher_id: teacher.user_id.clone(),
        teacher_name: teacher.display_name.clone(),
        promotion: draft.promotion.trim().to_string(),
        max_points: draft.max_points,
        status: AssignmentStatus::Active,
    })
}

/// Fetched assignments followed by cached ones for the same promotion.
pub fn merge_assignments(
    fetched: Vec<Assignment>,
    cache: &[Assignment],
    promotion: &str,
) -> Vec<Assignment> {
    let mut merged = fetched;
    merged.extend(cache.iter().filter(|a| a.promotion == promotion).cloned());
    merged
}

/// Whole days until `due` (midnight UTC), rounded up. Negative once overdue.
pub fn days_until_due(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due_at = due.and_time(chrono::NaiveTime::MIN).and_utc();
    let millis = (due_at - now).num_milliseconds();
    const DAY_MS: i64 = 86_400_000;
    millis.div_euclid(DAY_MS) + i64::from(millis.rem_euclid(DAY_MS) != 0)
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DueUrgency {
    Overdue,
    /// Three days or less.
    Imminent,
    /// Within the week.
    Soon,
    Later,
}

impl DueUrgency {
    pub fn for_days(days_left: i64) -> Self {
        match days_left {
            d if d < 0 => DueUrgency::Overdue,
            d if d <= 3 => DueUrgency::Imminent,
            d if d <= 7 => DueUrgency::Soon,
            _ => DueUrgency::Later,
        }
    }
}

/// An assignment as a student sees it.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub days_left: i64,
    pub urgency: DueUrgency,
}

pub fn assignment_views(assignments: Vec<Assignment>, now: DateTime<Utc>) -> Vec<AssignmentView> {
    assignments
        .into_iter()
        .map(|assignment| {
            let days_left = days_until_due(assignment.due_date, now);
            AssignmentView {
                assignment,
                days_left,
                urgency: DueUrgency::for_days(days_left),
            }
        })
        .collect()
}

/// A hand-in needs at least one named file.
pub fn validate_upload(upload: &SubmissionUpload) -> Result<()> {
    if upload.files.is_empty() {
        return Err(AppError::InvalidInput("At least one file is required".to_string()));
    }
    if upload.files.iter().any(|f| f.name.trim().is_empty()) {
        return Err(AppError::InvalidInput("File names cannot be empty".to_string()));
    }
    Ok(())
}

/// Submission record for an accepted hand-in. Only file metadata is kept.
pub fn submission_from_upload(
    assignment_id: &str,
    student: &Session,
    upload: SubmissionUpload,
    now: DateTime<Utc>,
) -> Submission {
    let comments = upload.comments.trim();
    Submission {
        id: Uuid::new_v4().to_string(),
        assignment_id: assignment_id.to_string(),
        student_id: student.user_id.clone(),
        student_name: student.display_name.clone(),
        submitted_at: now,
        files: upload
            .files
            .into_iter()
            .map(|file| FileSubmission {
                id: Uuid::new_v4().to_string(),
                name: file.name,
                size: file.size,
                mime_type: file.mime_type,
                url: "#".to_string(),
            })
            .collect(),
        comments: (!comments.is_empty()).then(|| comments.to_string()),
        grade: None,
        feedback: None,
    }
}

pub fn validate_grade(grade: f64, max_points: u32) -> Result<()> {
    if !grade.is_finite() || grade < 0.0 || grade > f64::from(max_points) {
        return Err(AppError::InvalidInput(format!(
            "Grade must be between 0 and {}",
            max_points
        )));
    }
    Ok(())
}

/// Stores a grade and feedback on submission `id`.
pub fn apply_grade(
    submissions: &mut [Submission],
    id: &str,
    grade: f64,
    feedback: &str,
    max_points: u32,
) -> Result<Submission> {
    validate_grade(grade, max_points)?;

    let submission = submissions
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", id)))?;

    submission.grade = Some(grade);
    let feedback = feedback.trim();
    submission.feedback = (!feedback.is_empty()).then(|| feedback.to_string());
    Ok(submission.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::CredentialDirectory;
    use crate::backend::fixtures;
    use crate::session::PortalContext;
    use crate::types::UploadedFile;
    use chrono::TimeZone;

    fn session(email: &str) -> Session {
        let mut context = PortalContext::new();
        context
            .login(&CredentialDirectory::default(), email, "password")
            .unwrap()
            .clone()
    }

    fn draft(promotion: &str) -> NewAssignment {
        NewAssignment {
            title: "Mini-projet Réseaux".to_string(),
            description: "Topologie en étoile".to_string(),
            course: "Réseaux".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            promotion: promotion.to_string(),
            max_points: 20,
        }
    }

    #[test]
    fn test_new_assignment_takes_teacher_identity() {
        let assignment = new_assignment(&session("teacher@example.com"), draft("L3 RT")).unwrap();

        assert_eq!(assignment.teacher_id, "2");
        assert_eq!(assignment.teacher_name, "M. Atemengue");
        assert_eq!(assignment.status, AssignmentStatus::Active);
    }

    #[test]
    fn test_new_assignment_validation() {
        let teacher = session("teacher@example.com");
        assert!(new_assignment(&teacher, draft("")).is_err());

        let mut zero = draft("L3 RT");
        zero.max_points = 0;
        assert!(new_assignment(&teacher, zero).is_err());
    }

    #[test]
    fn test_merge_keeps_same_promotion_only() {
        let teacher = session("teacher@example.com");
        let cache = vec![
            new_assignment(&teacher, draft("L3 RT")).unwrap(),
            new_assignment(&teacher, draft("M1 INFO")).unwrap(),
        ];

        let merged = merge_assignments(fixtures::assignments("L3 RT"), &cache, "L3 RT");

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].title, "Mini-projet Réseaux");
    }

    #[test]
    fn test_days_until_due_rounds_up() {
        let due = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();

        let morning = Utc.with_ymd_and_hms(2024, 2, 13, 8, 0, 0).unwrap();
        assert_eq!(days_until_due(due, morning), 2);

        let midnight = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();
        assert_eq!(days_until_due(due, midnight), 0);

        let late = Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap();
        assert_eq!(days_until_due(due, late), -1);
    }

    #[test]
    fn test_urgency_bands() {
        assert_eq!(DueUrgency::for_days(-1), DueUrgency::Overdue);
        assert_eq!(DueUrgency::for_days(3), DueUrgency::Imminent);
        assert_eq!(DueUrgency::for_days(7), DueUrgency::Soon);
        assert_eq!(DueUrgency::for_days(8), DueUrgency::Later);
    }

    #[test]
    fn test_upload_needs_a_file() {
        let empty = SubmissionUpload {
            files: vec![],
            comments: String::new(),
        };
        assert!(validate_upload(&empty).is_err());

        let upload = SubmissionUpload {
            files: vec![UploadedFile {
                name: "rapport.pdf".to_string(),
                size: 1024,
                mime_type: "application/pdf".to_string(),
            }],
            comments: "  ".to_string(),
        };
        assert!(validate_upload(&upload).is_ok());

        let submission =
            submission_from_upload("1", &session("student@example.com"), upload, Utc::now());
        assert_eq!(submission.files.len(), 1);
        assert_eq!(submission.comments, None);
    }

    #[test]
    fn test_grade_bounds() {
        let mut submissions = fixtures::submissions("1");

        assert!(apply_grade(&mut submissions, "1-1", 21.0, "", 20).is_err());
        assert!(apply_grade(&mut submissions, "1-1", -0.5, "", 20).is_err());
        assert!(submissions[0].grade.is_none());

        let graded = apply_grade(&mut submissions, "1-1", 20.0, "Très bien", 20).unwrap();
        assert_eq!(graded.grade, Some(20.0));
        assert_eq!(submissions[0].feedback.as_deref(), Some("Très bien"));
    }

    #[test]
    fn test_grade_unknown_submission() {
        let mut submissions = fixtures::submissions("1");
        assert!(matches!(
            apply_grade(&mut submissions, "9", 10.0, "", 20),
            Err(AppError::NotFound(_))
        ));
    }
}
