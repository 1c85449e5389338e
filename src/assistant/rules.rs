use serde::{Deserialize, Serialize};

use super::{Action, DispatchContext, InfoPayload, QuickAction};

/// Placeholder replaced by the display name in rule responses.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Verbs that turn a topic mention into a navigation request.
const NAVIGATION_VERBS: &[&str] = &["va à", "aller à", "ouvre", "affiche"];

pub const FALLBACK_TEXT: &str = "Je ne suis pas sûr de comprendre votre demande. Essayez de me dire \"va à mes notes\" ou \"ouvre l'emploi du temps\" pour que je puisse vous aider à naviguer. Vous pouvez aussi me demander \"que peux-tu faire ?\" pour voir toutes mes capacités !";

/// Condition over the lower-cased message and the dispatch context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// At least one keyword is a substring of the message.
    AnyOf(Vec<String>),
    /// Every nested predicate holds.
    AllOf(Vec<Predicate>),
    /// The caller is currently on this section.
    InSection(String),
}

impl Predicate {
    pub fn any_of(keywords: &[&str]) -> Self {
        Predicate::AnyOf(keywords.iter().map(|k| k.to_lowercase()).collect())
    }

    pub fn all_of(predicates: Vec<Predicate>) -> Self {
        Predicate::AllOf(predicates)
    }

    pub fn in_section(section: &str) -> Self {
        Predicate::InSection(section.to_string())
    }

    /// `lowered` must already be lower-cased.
    pub fn matches(&self, lowered: &str, context: &DispatchContext) -> bool {
        match self {
            Predicate::AnyOf(keywords) => keywords.iter().any(|k| lowered.contains(k.as_str())),
            Predicate::AllOf(predicates) => predicates.iter().all(|p| p.matches(lowered, context)),
            Predicate::InSection(section) => context.current_section.as_deref() == Some(section),
        }
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRule {
    pub name: String,
    pub predicate: Predicate,
    /// Reply text; `{name}` expands to the display name.
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl IntentRule {
    pub fn new(name: &str, predicate: Predicate, response: &str, action: Option<Action>) -> Self {
        Self {
            name: name.to_string(),
            predicate,
            response: response.to_string(),
            action,
        }
    }

    pub fn render(&self, context: &DispatchContext) -> String {
        self.response.replace(NAME_PLACEHOLDER, &context.display_name)
    }
}

fn navigation(name: &str, topics: &[&str], response: &str, target: &str, label: &str) -> IntentRule {
    IntentRule::new(
        name,
        Predicate::all_of(vec![
            Predicate::any_of(NAVIGATION_VERBS),
            Predicate::any_of(topics),
        ]),
        response,
        Some(Action::navigate(target, label)),
    )
}

fn topic(name: &str, keywords: &[&str], response: &str, target: &str, label: &str) -> IntentRule {
    IntentRule::new(
        name,
        Predicate::any_of(keywords),
        response,
        Some(Action::navigate(target, label)),
    )
}

fn quick_actions(entries: &[(&str, &str)]) -> Action {
    Action::QuickActions {
        actions: entries
            .iter()
            .map(|(label, section)| QuickAction::new(label, section))
            .collect(),
    }
}

/// The built-in table, in priority order.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        // Explicit navigation requests
        navigation(
            "navigate_notes",
            &["note", "résultat"],
            "Je vous emmène vers vos notes ! 📊",
            "notes",
            "Voir mes notes",
        ),
        navigation(
            "navigate_schedule",
            &["emploi", "planning", "cours"],
            "Direction votre emploi du temps ! 📅",
            "schedule",
            "Voir l'emploi du temps",
        ),
        navigation(
            "navigate_assignments",
            &["devoir", "assignment"],
            "Je vous dirige vers vos devoirs ! 📝",
            "assignments",
            "Voir les devoirs",
        ),
        navigation(
            "navigate_certifications",
            &["certification"],
            "Allons voir vos certifications ! 🏆",
            "certifications",
            "Voir les certifications",
        ),
        navigation(
            "navigate_library",
            &["bibliothèque", "document"],
            "Direction la bibliothèque ! 📚",
            "library",
            "Ouvrir la bibliothèque",
        ),
        navigation(
            "navigate_bulletin",
            &["babillard", "annonce"],
            "Je vous emmène au babillard ! 📋",
            "bulletin",
            "Voir le babillard",
        ),
        navigation(
            "navigate_profile",
            &["profil"],
            "Accédons à votre profil ! 👤",
            "profile",
            "Voir le profil",
        ),
        navigation(
            "navigate_notifications",
            &["chat", "notification"],
            "Ouvrons le chat de classe ! 💬",
            "notifications",
            "Ouvrir le chat",
        ),
        // Quick information
        IntentRule::new(
            "academic_summary",
            Predicate::any_of(&["moyenne", "statistique"]),
            "Voici un résumé de vos performances académiques :",
            Some(Action::ShowInfo {
                payload: InfoPayload::AcademicSummary {
                    average: "15.2/20".to_string(),
                    subjects: 5,
                    assignments: 3,
                },
                label: "Voir les détails".to_string(),
            }),
        ),
        IntentRule::new(
            "help",
            Predicate::any_of(&["aide", "que peux-tu faire"]),
            "Je peux vous aider avec de nombreuses tâches ! Voici ce que je peux faire pour vous :",
            Some(quick_actions(&[
                ("Voir mes notes", "notes"),
                ("Emploi du temps", "schedule"),
                ("Mes devoirs", "assignments"),
                ("Certifications", "certifications"),
            ])),
        ),
        // Section-aware advice
        IntentRule::new(
            "improve_notes",
            Predicate::all_of(vec![
                Predicate::in_section("notes"),
                Predicate::any_of(&["comment", "améliorer"]),
            ]),
            "Pour améliorer vos notes, je vous recommande de consulter les certifications disponibles !",
            Some(Action::navigate("certifications", "Voir les certifications")),
        ),
        // Bare topic mentions
        topic(
            "topic_notes",
            &["note", "résultat"],
            "Pour consulter vos notes, rendez-vous dans la section \"Mes Notes\" du menu. Vous y trouverez toutes vos évaluations avec les détails par matière.",
            "notes",
            "Aller aux notes",
        ),
        topic(
            "topic_schedule",
            &["emploi", "cours", "planning"],
            "Votre emploi du temps est disponible dans la section \"Emploi du temps\". Vous pouvez voir votre planning hebdomadaire et les détails de chaque cours.",
            "schedule",
            "Voir l'emploi du temps",
        ),
        topic(
            "topic_assignments",
            &["devoir", "assignment"],
            "Les devoirs à rendre sont listés dans la section \"Devoirs\". Vous pouvez y soumettre vos travaux et suivre les échéances.",
            "assignments",
            "Voir les devoirs",
        ),
        topic(
            "topic_certifications",
            &["certification", "formation"],
            "Découvrez nos cours de certification dans la section dédiée. Vous pouvez vous inscrire à différentes formations pour développer vos compétences.",
            "certifications",
            "Voir les certifications",
        ),
        topic(
            "topic_library",
            &["bibliothèque", "document"],
            "La bibliothèque contient tous les documents partagés : rapports, projets, cours et exercices. Utilisez la recherche pour trouver ce dont vous avez besoin.",
            "library",
            "Ouvrir la bibliothèque",
        ),
        topic(
            "topic_notifications",
            &["chat", "discussion"],
            "Vous pouvez discuter avec vos camarades de classe dans la section \"Notifications\" qui contient le chat de groupe de votre promotion.",
            "notifications",
            "Ouvrir le chat",
        ),
        topic(
            "topic_bulletin",
            &["babillard", "annonce", "résultat", "publication"],
            "Consultez le \"Babillard Numérique\" pour voir toutes les annonces, résultats d'examens et événements publiés par vos enseignants et l'administration.",
            "bulletin",
            "Voir le babillard",
        ),
        topic(
            "topic_requests",
            &["demande", "contact", "enseignant", "administration"],
            "Pour contacter l'administration ou signaler un problème, utilisez la section \"Mes Demandes\". Vous pouvez y soumettre différents types de demandes : erreurs de notes, conflits d'emploi du temps, problèmes techniques, etc.",
            "requests",
            "Faire une demande",
        ),
        // Greeting
        IntentRule::new(
            "greeting",
            Predicate::any_of(&["bonjour", "salut"]),
            "Bonjour {name} ! Ravi de vous aider. Que souhaitez-vous faire aujourd'hui ?",
            Some(quick_actions(&[
                ("Voir mes notes", "notes"),
                ("Emploi du temps", "schedule"),
                ("Mes devoirs", "assignments"),
            ])),
        ),
    ]
}
