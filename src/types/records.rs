//! School records exchanged with the backend and returned by the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Role;

// ============= Grades & Schedule =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Examen,
    Controle,
    Tp,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub course: String,
    pub value: f64,
    pub coefficient: f64,
    pub date: NaiveDate,
    pub kind: NoteKind,
    pub student_id: String,
    pub student_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    Cours,
    Td,
    Tp,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ScheduleItem {
    pub id: String,
    pub course: String,
    pub teacher: String,
    pub date: NaiveDate,
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
    pub room: String,
    pub kind: ScheduleKind,
    pub promotion: String,
}

// ============= Assignments =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub course: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub promotion: String,
    pub max_points: u32,
    pub status: AssignmentStatus,
}

fn default_max_points() -> u32 {
    20
}

/// Assignment form as filled in by a teacher.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NewAssignment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub course: String,
    pub due_date: NaiveDate,
    pub promotion: String,
    #[serde(default = "default_max_points")]
    pub max_points: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct FileSubmission {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub student_name: String,
    pub submitted_at: DateTime<Utc>,
    pub files: Vec<FileSubmission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// File metadata for a student hand-in. Contents are not transferred.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SubmissionUpload {
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct GradeRequest {
    pub grade: f64,
    #[serde(default)]
    pub feedback: String,
}

// ============= Requests =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    NoteError,
    ScheduleConflict,
    TechnicalIssue,
    Other,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct StudentRequest {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub kind: RequestKind,
    pub subject: String,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NewStudentRequest {
    pub kind: RequestKind,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RequestUpdate {
    pub status: RequestStatus,
    #[serde(default)]
    pub response: String,
}

// ============= Accounts =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub promotion: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordResetResponse {
    pub user_id: String,
    pub new_password: String,
}

// ============= Bulletin =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BulletinKind {
    Announcement,
    ExamResults,
    Event,
    Urgent,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct BulletinPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub kind: BulletinKind,
    pub author: String,
    pub author_role: Role,
    pub published_at: DateTime<Utc>,
    pub promotion: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    pub views: u32,
}

fn default_bulletin_kind() -> BulletinKind {
    BulletinKind::Announcement
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NewBulletinPost {
    pub title: String,
    pub content: String,
    #[serde(default = "default_bulletin_kind")]
    pub kind: BulletinKind,
    #[serde(default)]
    pub promotion: String,
    #[serde(default)]
    pub is_pinned: bool,
}

// ============= Library & Certifications =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Image,
    Video,
    Archive,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Rapport,
    Projet,
    Cours,
    Exercice,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct LibraryDocument {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
    pub category: DocumentCategory,
    pub author: String,
    pub upload_date: NaiveDate,
    pub size: String,
    pub downloads: u32,
    pub rating: f32,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
pub enum CertificationLevel {
    #[serde(rename = "débutant")]
    Beginner,
    #[serde(rename = "intermédiaire")]
    Intermediate,
    #[serde(rename = "avancé")]
    Advanced,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Certification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub level: CertificationLevel,
    pub category: String,
    pub enrolled: u32,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_lessons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lessons: Option<u32>,
    #[serde(default)]
    pub certificate: bool,
}
