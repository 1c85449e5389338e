//! Rule-based chat assistant
//!
//! The assistant turns one line of free text into a bot utterance and an
//! optional structured [`Action`]. Matching is a first-match-wins walk over
//! an ordered table of keyword rules (see [`rules`]); there is no scoring.
//!
//! - [`assistant::dispatcher`](crate::assistant::dispatcher) - the dispatcher itself
//! - [`assistant::rules`](crate::assistant::rules) - predicates and the default rule table
//!
//! The dispatcher is stateless. Callers own the [`ChatTranscript`] and decide
//! whether a `navigate` action should move the view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// First-match-wins intent dispatch.
pub mod dispatcher;
/// Keyword predicates and the default rule table.
pub mod rules;

pub use dispatcher::IntentDispatcher;
pub use rules::{IntentRule, Predicate};

/// Structured follow-up attached to a bot message.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Move the dashboard to `target`.
    Navigate { target: String, label: String },
    /// Display an information card.
    ShowInfo { payload: InfoPayload, label: String },
    /// Offer a list of shortcut buttons.
    QuickActions { actions: Vec<QuickAction> },
}

impl Action {
    pub fn navigate(target: &str, label: &str) -> Self {
        Action::Navigate {
            target: target.to_string(),
            label: label.to_string(),
        }
    }

    /// Target section when this is a navigation action.
    pub fn target_section(&self) -> Option<&str> {
        match self {
            Action::Navigate { target, .. } => Some(target),
            Action::ShowInfo { .. } | Action::QuickActions { .. } => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct QuickAction {
    pub label: String,
    pub section: String,
}

impl QuickAction {
    pub fn new(label: &str, section: &str) -> Self {
        Self {
            label: label.to_string(),
            section: section.to_string(),
        }
    }
}

/// Information card payloads. Values are demo literals.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InfoPayload {
    AcademicSummary {
        average: String,
        subjects: u32,
        assignments: u32,
    },
}

/// What the caller knows about the person chatting.
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    /// Dashboard section currently on screen.
    pub current_section: Option<String>,
    pub display_name: String,
}

impl DispatchContext {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            current_section: None,
            display_name: display_name.into(),
        }
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.current_section = Some(section.into());
        self
    }
}

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub action: Option<Action>,
    /// Name of the rule that matched; `None` for the fallback.
    pub matched_rule: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::User,
            text: text.into(),
            timestamp: Utc::now(),
            action: None,
        }
    }

    pub fn bot(text: impl Into<String>, action: Option<Action>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            action,
        }
    }
}

impl From<BotReply> for ChatMessage {
    fn from(reply: BotReply) -> Self {
        ChatMessage::bot(reply.text, reply.action)
    }
}

/// Opening line of every conversation.
pub fn welcome_text(display_name: &str) -> String {
    format!(
        "Bonjour {} ! Je suis votre assistant virtuel intelligent. Je peux vous aider à naviguer dans le portail et effectuer des tâches pour vous. Que souhaitez-vous faire ?",
        display_name
    )
}

/// Append-only conversation log for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Starts a transcript with the welcome message.
    pub fn welcome(display_name: &str) -> Self {
        Self {
            messages: vec![ChatMessage::bot(welcome_text(display_name), None)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
