//! Chat command implementation
//!
//! Runs the portal assistant in the terminal against a local view state, the
//! same way the `/api/chat` endpoint drives a signed-in session.

use std::io::{BufRead, Write};

use super::output::Output;
use crate::assistant::{ChatMessage, ChatTranscript, DispatchContext, IntentDispatcher};
use crate::types::Role;
use crate::views::ViewState;

/// Configuration for the chat command
pub struct ChatConfig {
    pub display_name: String,
    pub role: Role,
    pub section: String,
    /// Follow navigation suggestions
    pub auto_navigate: bool,
}

/// A terminal conversation: transcript plus the view it moves.
pub struct ChatSession {
    dispatcher: IntentDispatcher,
    display_name: String,
    auto_navigate: bool,
    pub view: ViewState,
    pub transcript: ChatTranscript,
}

impl ChatSession {
    pub fn new(config: ChatConfig, dispatcher: IntentDispatcher) -> Self {
        let mut view = ViewState::signed_in(config.role);
        view.navigate(&config.section);

        Self {
            dispatcher,
            transcript: ChatTranscript::welcome(&config.display_name),
            display_name: config.display_name,
            auto_navigate: config.auto_navigate,
            view,
        }
    }

    /// Answers one message. Blank input is ignored.
    pub fn send(&mut self, text: &str, output: &Output) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let context =
            DispatchContext::new(self.display_name.clone()).in_section(&self.view.active_section);
        let reply = self.dispatcher.dispatch(text, &context);

        self.transcript.push(ChatMessage::user(text));
        output.bot(&reply.text, reply.action.as_ref());

        if self.auto_navigate {
            if let Some(target) = reply.action.as_ref().and_then(|a| a.target_section()) {
                let screen = self.view.navigate(target);
                output.screen(&screen.id());
            }
        }

        let message = ChatMessage::from(reply);
        self.transcript.push(message.clone());
        Some(message)
    }
}

/// Reads messages from `input` until EOF or `quit`.
pub fn repl<R: BufRead>(session: &mut ChatSession, input: R, output: &Output) -> std::io::Result<()> {
    if let Some(welcome) = session.transcript.messages().first() {
        output.bot(&welcome.text, None);
    }
    output.screen(&session.view.screen().id());

    let mut lines = input.lines();
    loop {
        print!("  you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        session.send(&line, output);
    }

    output.newline();
    output.info(&format!(
        "{} messages exchanged",
        session.transcript.len().saturating_sub(1)
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Author;
    use std::io::Cursor;

    fn session(auto_navigate: bool) -> ChatSession {
        ChatSession::new(
            ChatConfig {
                display_name: "Djeukeng Kana".to_string(),
                role: Role::Student,
                section: "dashboard".to_string(),
                auto_navigate,
            },
            IntentDispatcher::default(),
        )
    }

    #[test]
    fn test_send_navigates_when_enabled() {
        let mut chat = session(true);

        let reply = chat.send("mes notes", &Output::no_color()).unwrap();

        assert_eq!(reply.author, Author::Bot);
        assert_eq!(chat.view.active_section, "notes");
        assert_eq!(chat.transcript.len(), 3);
    }

    #[test]
    fn test_send_keeps_view_when_disabled() {
        let mut chat = session(false);

        chat.send("mes notes", &Output::no_color());

        assert_eq!(chat.view.active_section, "dashboard");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = session(true);

        assert!(chat.send("   ", &Output::no_color()).is_none());
        assert_eq!(chat.transcript.len(), 1);
    }

    #[test]
    fn test_repl_stops_at_quit() {
        let mut chat = session(true);
        let input = Cursor::new("emploi du temps\nquit\nmes notes\n");

        repl(&mut chat, input, &Output::no_color()).unwrap();

        assert_eq!(chat.transcript.len(), 3);
        assert_eq!(chat.view.active_section, "schedule");
    }
}
