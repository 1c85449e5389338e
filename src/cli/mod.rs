//! CLI module for Campus Portal
//!
//! Provides command-line interface parsing and handling for the campus-portal binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod chat;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::Role;
use crate::views::{self, PublicView, Screen};

/// Campus Portal - role-based school portal server
///
/// Serves the student, teacher and administration dashboards together with
/// the portal assistant.
#[derive(Parser, Debug)]
#[command(
    name = "campus-portal",
    version,
    about = "Campus Portal - role-based school portal server",
    long_about = "Serves the student, teacher and administration dashboards of the school portal,\n\
                  the rule-based assistant and a simulated school backend.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a configuration.",
    after_help = "EXAMPLES:\n    \
                  campus-portal init                   # Write campus.toml and .env.example\n    \
                  campus-portal                        # Start the server (requires campus.toml)\n    \
                  campus-portal chat \"mes notes\"       # Ask the assistant once\n    \
                  campus-portal route --role teacher grading\n    \
                  campus-portal --config my.toml       # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "campus.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (the default when no subcommand is given)
    Serve,

    /// Write campus.toml, .env.example and .gitignore
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Configure the simulated backend to answer without delay
        #[arg(long)]
        instant: bool,
    },

    /// Show configuration information
    Config {
        /// Show the full configuration
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Talk to the portal assistant
    ///
    /// With a message, answers once and exits. Without one, starts an
    /// interactive session; type `quit` to leave.
    Chat {
        /// Message to send
        message: Option<String>,

        /// Name used in personalized replies
        #[arg(long, default_value = "Étudiant")]
        name: String,

        /// Role whose dashboard the conversation runs in
        #[arg(long, default_value = "student", value_parser = parse_role)]
        role: Role,

        /// Section currently on screen
        #[arg(long, default_value = views::DEFAULT_SECTION)]
        section: String,

        /// Do not follow navigation suggestions
        #[arg(long)]
        no_navigate: bool,
    },

    /// Show which screen a view state renders
    Route {
        /// Requested dashboard section
        #[arg(default_value = views::DEFAULT_SECTION)]
        section: String,

        /// Role of the signed-in user; unrecognized names have no dashboard
        #[arg(long)]
        role: Option<String>,

        /// Resolve as a visitor who is not signed in
        #[arg(long)]
        anonymous: bool,

        /// Public page shown to visitors (landing, certifications, login)
        #[arg(long)]
        public_view: Option<String>,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role '{}'", value))
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Screen for the view state described by `route` arguments.
pub fn resolve_route(
    section: &str,
    role: Option<&str>,
    anonymous: bool,
    public_view: Option<&str>,
) -> Screen {
    views::route(
        !anonymous,
        role.and_then(Role::parse),
        section,
        PublicView::parse(public_view),
    )
}
