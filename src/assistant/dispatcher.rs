use super::rules::{default_rules, IntentRule, FALLBACK_TEXT};
use super::{BotReply, DispatchContext};

/// Walks an ordered rule table and answers with the first rule that matches.
#[derive(Debug, Clone)]
pub struct IntentDispatcher {
    rules: Vec<IntentRule>,
    fallback: String,
}

impl Default for IntentDispatcher {
    fn default() -> Self {
        Self::new(default_rules(), FALLBACK_TEXT)
    }
}

impl IntentDispatcher {
    pub fn new(rules: Vec<IntentRule>, fallback: &str) -> Self {
        Self {
            rules,
            fallback: fallback.to_string(),
        }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classifies `text`. Never fails; unmatched input gets the fallback text
    /// and no action.
    pub fn dispatch(&self, text: &str, context: &DispatchContext) -> BotReply {
        let lowered = text.to_lowercase();

        for rule in &self.rules {
            if rule.predicate.matches(&lowered, context) {
                tracing::debug!("Chat message matched rule '{}'", rule.name);
                return BotReply {
                    text: rule.render(context),
                    action: rule.action.clone(),
                    matched_rule: Some(rule.name.clone()),
                };
            }
        }

        tracing::debug!("Chat message matched no rule, using fallback");
        BotReply {
            text: self.fallback.clone(),
            action: None,
            matched_rule: None,
        }
    }
}
