//! Init command implementation
//!
//! Scaffolds a portal deployment: `campus.toml`, `.env.example` and `.gitignore`.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    Success,
    /// campus.toml already exists and `--force` was not given
    AlreadyExists,
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    pub host: String,
    pub port: u16,
    /// Answer backend calls without simulated latency
    pub instant: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Campus Portal");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join("campus.toml");
    if config_path.exists() && !config.force {
        output.warning("campus.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = write_file(&config_path, &generate_campus_toml(&config), config.force) {
        output.error(&format!("Failed to create campus.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "campus.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    let gitignore_path = base_path.join(".gitignore");
    if gitignore_path.exists() {
        output.skipped(".gitignore", "already exists");
    } else if let Err(e) = write_file(&gitignore_path, GITIGNORE, false) {
        output.warning(&format!("Failed to create .gitignore: {}", e));
    } else {
        output.created("file", ".gitignore");
    }

    output.complete("Campus Portal initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set the token signing secret:");
    output.command("cp .env.example .env");
    output.newline();
    output.info("2. Start the server:");
    output.command("campus-portal");
    output.newline();
    output.info("3. Sign in with a demo account (password: \"password\"):");
    output.list_item("student@example.com");
    output.list_item("teacher@example.com");
    output.list_item("admin@example.com");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

/// Skips existing files unless `force` is set.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_campus_toml(config: &InitConfig) -> String {
    let latency_scale = if config.instant { "0.0" } else { "1.0" };

    format!(
        r#"# Campus Portal configuration
# ===========================

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Environment variable holding the token signing secret (see .env.example)
jwt_secret_env = "JWT_SECRET"
# Access token validity in seconds
jwt_access_expiry = 3600

[backend]
# Multiplier for the simulated backend latencies (0 answers instantly)
latency_scale = {latency_scale}
# Random extra delay per call, in milliseconds
jitter_ms = 0

[assistant]
# Follow "navigate" suggestions from the assistant automatically
auto_navigate = true
"#,
        host = config.host,
        port = config.port,
        latency_scale = latency_scale,
    )
}

fn generate_env_example() -> String {
    r#"# Campus Portal environment variables
# Copy this file to .env and fill in the values.

# REQUIRED: token signing secret (minimum 32 characters)
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: log filter, overrides server.log_level
RUST_LOG=info,campus=debug
"#
    .to_string()
}

const GITIGNORE: &str = r#"# Environment
.env
.env.local

# Rust
/target/

# OS
.DS_Store
"#;
