//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the campus-portal CLI.

use owo_colors::OwoColorize;

use crate::assistant::Action;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "Campus Portal".bright_cyan().bold(),
                version.dimmed(),
                "Espace étudiant, enseignant et administration".bright_white()
            );
        } else {
            println!(
                "\n   Campus Portal {}\n   Espace étudiant, enseignant et administration\n",
                version
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    /// Print an assistant reply and the action attached to it
    pub fn bot(&self, text: &str, action: Option<&Action>) {
        if self.colored {
            println!("  {} {}", "assistant>".bright_magenta().bold(), text);
        } else {
            println!("  assistant> {}", text);
        }

        if let Some(action) = action {
            self.action(action);
        }
    }

    fn action(&self, action: &Action) {
        let lines: Vec<String> = match action {
            Action::Navigate { target, label } => vec![format!("{} -> {}", label, target)],
            Action::ShowInfo { label, .. } => vec![label.clone()],
            Action::QuickActions { actions } => actions
                .iter()
                .map(|a| format!("{} -> {}", a.label, a.section))
                .collect(),
        };

        for line in lines {
            if self.colored {
                println!("    {} {}", "↳".cyan(), line.cyan());
            } else {
                println!("    > {}", line);
            }
        }
    }

    /// Print the screen the router settled on
    pub fn screen(&self, id: &str) {
        if self.colored {
            println!("  {} {}", "screen:".dimmed(), id.bright_white().bold());
        } else {
            println!("  screen: {}", id);
        }
    }

    pub fn newline(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::QuickAction;

    #[test]
    fn test_output_constructors() {
        assert!(Output::new().colored);
        assert!(!Output::no_color().colored);
        assert!(Output::default().colored);
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.created("file", "path/to/file");
            output.skipped("path", "reason");
            output.header("Test Header");
            output.kv("key", "value");
            output.list_item("item");
            output.hint("hint message");
            output.command("some command");
            output.complete("complete message");
            output.screen("student/notes");
            output.newline();
        }
    }

    #[test]
    fn test_bot_renders_every_action_kind() {
        let output = Output::no_color();

        output.bot("plain", None);
        output.bot("go", Some(&Action::navigate("notes", "Voir mes notes")));
        output.bot(
            "pick",
            Some(&Action::QuickActions {
                actions: vec![QuickAction::new("Mes notes", "notes")],
            }),
        );
    }
}
