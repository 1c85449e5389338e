use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::types::{
    Assignment, AssignmentStatus, Attachment, BulletinKind, BulletinPost, Certification,
    CertificationLevel, DocumentCategory, DocumentKind, FileSubmission, LibraryDocument, Note,
    NoteKind, RequestKind, RequestStatus, Role, ScheduleItem, ScheduleKind, StudentRequest,
    Submission, UserAccount,
};

pub const DEMO_STUDENT_NAME: &str = "Djeukeng Kana";
pub const DEMO_PROMOTION: &str = "L3 RT";
pub const RESET_PASSWORD: &str = "nouveau-mot-de-passe-123";

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn notes(student_id: &str) -> Vec<Note> {
    let note = |id: &str, course: &str, value: f64, coefficient: f64, date: NaiveDate, kind: NoteKind| Note {
        id: id.to_string(),
        course: course.to_string(),
        value,
        coefficient,
        date,
        kind,
        student_id: student_id.to_string(),
        student_name: DEMO_STUDENT_NAME.to_string(),
    };

    vec![
        note("1", "Algorithmique", 16.0, 3.0, day(2024, 1, 15), NoteKind::Examen),
        note("2", "Base de Données", 14.0, 2.0, day(2024, 1, 10), NoteKind::Controle),
        note("3", "Programmation Web", 18.0, 4.0, day(2024, 1, 20), NoteKind::Tp),
        note("4", "Réseaux", 12.0, 2.0, day(2024, 1, 8), NoteKind::Controle),
        note("5", "Intelligence Artificielle", 15.0, 3.0, day(2024, 1, 25), NoteKind::Examen),
    ]
}

pub fn schedule(promotion: &str) -> Vec<ScheduleItem> {
    let item = |id: &str,
                course: &str,
                teacher: &str,
                date: NaiveDate,
                start: &str,
                end: &str,
                room: &str,
                kind: ScheduleKind| ScheduleItem {
        id: id.to_string(),
        course: course.to_string(),
        teacher: teacher.to_string(),
        date,
        start: start.to_string(),
        end: end.to_string(),
        room: room.to_string(),
        kind,
        promotion: promotion.to_string(),
    };

    vec![
        item("1", "Algorithmique Avancée", "Prof. Martin", day(2024, 1, 29), "08:00", "10:00", "A101", ScheduleKind::Cours),
        item("2", "TP Base de Données", "Prof. Bernard", day(2024, 1, 29), "10:15", "12:15", "B205", ScheduleKind::Tp),
        item("3", "Programmation Web", "Prof. Leroy", day(2024, 1, 29), "14:00", "16:00", "C301", ScheduleKind::Cours),
        item("4", "TD Réseaux", "Prof. Durand", day(2024, 1, 30), "08:00", "09:30", "A203", ScheduleKind::Td),
    ]
}

fn database_project(teacher_id: &str, promotion: &str) -> Assignment {
    Assignment {
        id: "1".to_string(),
        title: "Projet Base de Données".to_string(),
        description: "Conception et implémentation d'une base de données pour un système de gestion de bibliothèque".to_string(),
        due_date: day(2024, 2, 15),
        course: "Base de Données".to_string(),
        teacher_id: teacher_id.to_string(),
        teacher_name: "Prof. Bernard".to_string(),
        promotion: promotion.to_string(),
        max_points: 20,
        status: AssignmentStatus::Active,
    }
}

pub fn assignments(promotion: &str) -> Vec<Assignment> {
    vec![
        database_project("2", promotion),
        Assignment {
            id: "2".to_string(),
            title: "TP Algorithmique".to_string(),
            description: "Implémentation d'algorithmes de tri et analyse de complexité".to_string(),
            due_date: day(2024, 2, 10),
            course: "Algorithmique".to_string(),
            teacher_id: "2".to_string(),
            teacher_name: "Prof. Martin".to_string(),
            promotion: promotion.to_string(),
            max_points: 15,
            status: AssignmentStatus::Active,
        },
    ]
}

pub fn teacher_assignments(teacher_id: &str) -> Vec<Assignment> {
    vec![database_project(teacher_id, DEMO_PROMOTION)]
}

pub fn submissions(assignment_id: &str) -> Vec<Submission> {
    vec![Submission {
        id: format!("{assignment_id}-1"),
        assignment_id: assignment_id.to_string(),
        student_id: "1".to_string(),
        student_name: DEMO_STUDENT_NAME.to_string(),
        submitted_at: at(2024, 1, 28, 10, 30),
        files: vec![FileSubmission {
            id: "1".to_string(),
            name: "projet_bdd.pdf".to_string(),
            size: 2_048_576,
            mime_type: "application/pdf".to_string(),
            url: "#".to_string(),
        }],
        comments: Some(
            "Voici mon projet de base de données avec la documentation complète.".to_string(),
        ),
        grade: None,
        feedback: None,
    }]
}

pub fn users() -> Vec<UserAccount> {
    vec![
        UserAccount {
            id: "1".to_string(),
            name: DEMO_STUDENT_NAME.to_string(),
            email: "student@example.com".to_string(),
            role: Role::Student,
            promotion: Some(DEMO_PROMOTION.to_string()),
            department: None,
            created_at: at(2024, 1, 1, 0, 0),
            is_active: true,
        },
        UserAccount {
            id: "2".to_string(),
            name: "Prof. Martin Dubois".to_string(),
            email: "teacher@example.com".to_string(),
            role: Role::Teacher,
            promotion: None,
            department: Some("Informatique".to_string()),
            created_at: at(2024, 1, 1, 0, 0),
            is_active: true,
        },
    ]
}

pub fn requests() -> Vec<StudentRequest> {
    let created = at(2024, 1, 28, 9, 0);
    vec![StudentRequest {
        id: "1".to_string(),
        student_id: "1".to_string(),
        student_name: DEMO_STUDENT_NAME.to_string(),
        kind: RequestKind::NoteError,
        subject: "Erreur dans la note d'algorithmique".to_string(),
        description: "Ma note d'examen d'algorithmique semble incorrecte. J'ai obtenu 16/20 mais le système affiche 12/20.".to_string(),
        status: RequestStatus::Pending,
        created_at: created,
        updated_at: created,
        admin_response: None,
    }]
}

/// Request history shown to a student before any new submission.
pub fn student_requests(student_id: &str, student_name: &str) -> Vec<StudentRequest> {
    let first = at(2024, 1, 28, 9, 0);
    let second = at(2024, 1, 25, 14, 30);
    vec![
        StudentRequest {
            id: "1".to_string(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            kind: RequestKind::NoteError,
            subject: "Erreur dans la note d'algorithmique".to_string(),
            description: "Ma note d'examen d'algorithmique semble incorrecte.".to_string(),
            status: RequestStatus::Pending,
            created_at: first,
            updated_at: first,
            admin_response: None,
        },
        StudentRequest {
            id: "2".to_string(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            kind: RequestKind::ScheduleConflict,
            subject: "Conflit entre deux cours".to_string(),
            description: "J'ai deux cours programmés en même temps le mardi.".to_string(),
            status: RequestStatus::Resolved,
            created_at: second,
            updated_at: second,
            admin_response: Some(
                "Le conflit a été résolu. Votre emploi du temps a été mis à jour.".to_string(),
            ),
        },
    ]
}

pub fn bulletin_posts() -> Vec<BulletinPost> {
    let pdf = |id: &str, name: &str| Attachment {
        id: id.to_string(),
        name: name.to_string(),
        kind: "pdf".to_string(),
        url: "#".to_string(),
    };

    vec![
        BulletinPost {
            id: "1".to_string(),
            title: "Résultats Examen Algorithmique - Session Janvier 2024".to_string(),
            content: "Les résultats de l'examen d'algorithmique sont maintenant disponibles. La moyenne de la classe est de 14.2/20. Félicitations à tous pour vos efforts !".to_string(),
            kind: BulletinKind::ExamResults,
            author: "Prof. Martin Dubois".to_string(),
            author_role: Role::Teacher,
            published_at: at(2024, 1, 29, 9, 0),
            promotion: DEMO_PROMOTION.to_string(),
            is_pinned: true,
            attachments: vec![pdf("1", "resultats_algo_janvier_2024.pdf")],
            views: 45,
        },
        BulletinPost {
            id: "2".to_string(),
            title: "URGENT: Modification Emploi du Temps - Semaine du 5 Février".to_string(),
            content: "En raison d'un empêchement du Prof. Bernard, le cours de Base de Données du mardi 6 février est reporté au jeudi 8 février à 14h en salle C301.".to_string(),
            kind: BulletinKind::Urgent,
            author: "Administration".to_string(),
            author_role: Role::Admin,
            published_at: at(2024, 1, 28, 16, 30),
            promotion: DEMO_PROMOTION.to_string(),
            is_pinned: true,
            attachments: Vec::new(),
            views: 67,
        },
        BulletinPost {
            id: "3".to_string(),
            title: "Conférence Tech - Intelligence Artificielle et Éthique".to_string(),
            content: "Nous avons le plaisir de vous inviter à une conférence sur l'IA et l'éthique le 15 février à 14h en amphithéâtre A. Intervenant: Dr. Sophie Laurent, experte en IA éthique.".to_string(),
            kind: BulletinKind::Event,
            author: "Prof. Marie Rousseau".to_string(),
            author_role: Role::Teacher,
            published_at: at(2024, 1, 27, 11, 0),
            promotion: DEMO_PROMOTION.to_string(),
            is_pinned: false,
            attachments: Vec::new(),
            views: 32,
        },
        BulletinPost {
            id: "4".to_string(),
            title: "Ouverture des Inscriptions - Certifications Printemps 2024".to_string(),
            content: "Les inscriptions pour les certifications du semestre de printemps sont ouvertes ! Nouvelles certifications disponibles : Cybersécurité Avancée, DevOps, et Cloud Computing.".to_string(),
            kind: BulletinKind::Announcement,
            author: "Administration".to_string(),
            author_role: Role::Admin,
            published_at: at(2024, 1, 26, 10, 15),
            promotion: DEMO_PROMOTION.to_string(),
            is_pinned: false,
            attachments: Vec::new(),
            views: 89,
        },
        BulletinPost {
            id: "5".to_string(),
            title: "Résultats Projet Base de Données - Groupe A".to_string(),
            content: "Les notes du projet de base de données pour le groupe A sont disponibles. Excellent travail d'équipe ! La présentation orale aura lieu la semaine prochaine.".to_string(),
            kind: BulletinKind::ExamResults,
            author: "Prof. Thomas Bernard".to_string(),
            author_role: Role::Teacher,
            published_at: at(2024, 1, 25, 14, 45),
            promotion: DEMO_PROMOTION.to_string(),
            is_pinned: false,
            attachments: vec![pdf("2", "notes_projet_bdd_groupe_a.pdf")],
            views: 28,
        },
    ]
}

pub fn library_documents() -> Vec<LibraryDocument> {
    #[allow(clippy::too_many_arguments)]
    fn doc(
        id: &str,
        title: &str,
        kind: DocumentKind,
        category: DocumentCategory,
        author: &str,
        upload_date: NaiveDate,
        size: &str,
        downloads: u32,
        rating: f32,
        description: &str,
        tag_list: &[&str],
    ) -> LibraryDocument {
        LibraryDocument {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            category,
            author: author.to_string(),
            upload_date,
            size: size.to_string(),
            downloads,
            rating,
            description: description.to_string(),
            tags: tags(tag_list),
        }
    }

    vec![
        doc(
            "1",
            "Rapport de Stage - Développement Web",
            DocumentKind::Pdf,
            DocumentCategory::Rapport,
            "Marie Dubois",
            day(2024, 1, 15),
            "2.5 MB",
            45,
            4.8,
            "Rapport de stage de 6 mois chez une startup tech, focus sur React et Node.js",
            &["stage", "web", "react", "nodejs"],
        ),
        doc(
            "2",
            "Projet Base de Données - Système de Gestion",
            DocumentKind::Archive,
            DocumentCategory::Projet,
            "Pierre Martin",
            day(2024, 1, 10),
            "15.2 MB",
            32,
            4.5,
            "Projet complet avec code source, documentation et base de données",
            &["bdd", "mysql", "php", "projet"],
        ),
        doc(
            "3",
            "Cours Algorithmique Avancée",
            DocumentKind::Pdf,
            DocumentCategory::Cours,
            "Prof. Martin",
            day(2024, 1, 20),
            "8.7 MB",
            128,
            4.9,
            "Support de cours complet avec exercices corrigés",
            &["algorithmique", "cours", "exercices"],
        ),
        doc(
            "4",
            "Présentation Intelligence Artificielle",
            DocumentKind::Pdf,
            DocumentCategory::Cours,
            "Sophie Laurent",
            day(2024, 1, 18),
            "12.1 MB",
            67,
            4.6,
            "Présentation sur les réseaux de neurones et machine learning",
            &["ia", "ml", "présentation"],
        ),
        doc(
            "5",
            "Exercices Corrigés - Programmation C++",
            DocumentKind::Doc,
            DocumentCategory::Exercice,
            "Thomas Leroy",
            day(2024, 1, 12),
            "1.8 MB",
            89,
            4.7,
            "Collection d'exercices avec solutions détaillées",
            &["cpp", "exercices", "programmation"],
        ),
    ]
}

pub fn certifications() -> Vec<Certification> {
    let open = |id: &str,
                title: &str,
                description: &str,
                instructor: &str,
                duration: &str,
                level: CertificationLevel,
                category: &str,
                enrolled: u32,
                rating: f32| Certification {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructor: instructor.to_string(),
        duration: duration.to_string(),
        level,
        category: category.to_string(),
        enrolled,
        rating,
        progress: None,
        is_enrolled: false,
        completed_lessons: None,
        total_lessons: None,
        certificate: false,
    };

    vec![
        Certification {
            progress: Some(65),
            is_enrolled: true,
            completed_lessons: Some(13),
            total_lessons: Some(20),
            ..open(
                "1",
                "Développement Web Full Stack",
                "Maîtrisez React, Node.js, et les bases de données pour devenir développeur full stack",
                "Prof. Martin Dubois",
                "40h",
                CertificationLevel::Intermediate,
                "web",
                156,
                4.8,
            )
        },
        Certification {
            progress: Some(100),
            is_enrolled: true,
            completed_lessons: Some(15),
            total_lessons: Some(15),
            certificate: true,
            ..open(
                "2",
                "Science des Données avec Python",
                "Apprenez l'analyse de données, machine learning et visualisation avec Python",
                "Dr. Sophie Laurent",
                "35h",
                CertificationLevel::Advanced,
                "data",
                89,
                4.9,
            )
        },
        open(
            "3",
            "Développement Mobile avec React Native",
            "Créez des applications mobiles cross-platform avec React Native",
            "Prof. Pierre Leroy",
            "30h",
            CertificationLevel::Intermediate,
            "mobile",
            124,
            4.6,
        ),
        open(
            "4",
            "Cybersécurité et Ethical Hacking",
            "Découvrez les techniques de sécurité informatique et de test de pénétration",
            "Dr. Thomas Bernard",
            "45h",
            CertificationLevel::Advanced,
            "security",
            67,
            4.7,
        ),
        open(
            "5",
            "Introduction à l'Intelligence Artificielle",
            "Bases de l'IA, réseaux de neurones et applications pratiques",
            "Prof. Marie Rousseau",
            "25h",
            CertificationLevel::Beginner,
            "data",
            203,
            4.5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_belong_to_student() {
        let notes = notes("42");
        assert_eq!(notes.len(), 5);
        assert!(notes.iter().all(|n| n.student_id == "42"));
    }

    #[test]
    fn test_schedule_carries_promotion() {
        let items = schedule("M1 INFO");
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.promotion == "M1 INFO"));
    }

    #[test]
    fn test_timestamps_are_valid() {
        assert_eq!(submissions("1")[0].submitted_at.to_rfc3339(), "2024-01-28T10:30:00+00:00");
        assert_eq!(requests()[0].created_at.to_rfc3339(), "2024-01-28T09:00:00+00:00");
    }

    #[test]
    fn test_submission_ids_differ_across_assignments() {
        assert_eq!(submissions("1")[0].id, "1-1");
        assert_ne!(submissions("1")[0].id, submissions("2")[0].id);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(bulletin_posts().len(), 5);
        assert_eq!(library_documents().len(), 5);
        assert_eq!(certifications().len(), 5);
        assert_eq!(certifications().iter().filter(|c| c.is_enrolled).count(), 2);
    }
}
