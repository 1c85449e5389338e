//! TOML-based configuration for the campus portal
//!
//! The server reads `campus.toml` at startup. Secrets never live in the file:
//! `auth.jwt_secret_env` names the environment variable that holds the JWT
//! signing secret (typically set through `.env`).
//!
//! Use [`PortalConfigManager`] for thread-safe access to the current
//! configuration; [`PortalConfigManager::reload`] swaps in a fresh copy and
//! [`PortalConfigManager::reload_on`] does so on every external trigger
//! (`SIGHUP` in the server binary).

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::backend::Latency;

/// Root configuration structure loaded from campus.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Access token validity in seconds
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_expiry: i64,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_jwt_access_expiry() -> i64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            jwt_access_expiry: default_jwt_access_expiry(),
        }
    }
}

// ============= Backend Configuration =============

/// Behaviour of the simulated school backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Multiplier applied to every base latency. `0` answers instantly.
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,

    /// Upper bound of the random delay added to each call, in milliseconds.
    #[serde(default)]
    pub jitter_ms: u64,
}

fn default_latency_scale() -> f64 {
    1.0
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency_scale: default_latency_scale(),
            jitter_ms: 0,
        }
    }
}

impl BackendConfig {
    pub fn latency(&self) -> Latency {
        Latency {
            scale: self.latency_scale,
            jitter_ms: self.jitter_ms,
        }
    }
}

// ============= Assistant Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Apply `navigate` actions to the view state without a click.
    #[serde(default = "default_true")]
    pub auto_navigate: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            auto_navigate: default_true(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl PortalConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse without validating (no env lookups).
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate values and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if !self.backend.latency_scale.is_finite() || self.backend.latency_scale < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "backend.latency_scale must be a non-negative number, got {}",
                self.backend.latency_scale
            )));
        }

        if self.auth.jwt_access_expiry <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.jwt_access_expiry must be positive".to_string(),
            ));
        }

        self.validate_env_var(&self.auth.jwt_secret_env)?;
        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        std::env::var(&self.auth.jwt_secret_env)
            .map_err(|_| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Serialize back to TOML (used by `campus-portal config`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

// ============= Configuration Manager =============

/// Thread-safe configuration holder with manual reloading
pub struct PortalConfigManager {
    config: Arc<ArcSwap<PortalConfig>>,
    config_path: Option<PathBuf>,
}

impl PortalConfigManager {
    /// Load the initial config from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = PortalConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: Some(path),
        })
    }

    /// Create a config manager directly from a config (useful for testing).
    /// Reloading is a no-op for managers without a backing file.
    pub fn from_config(config: PortalConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: None,
        }
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<PortalConfig> {
        self.config.load_full()
    }

    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Reload the configuration from disk. On error the previous config stays.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        info!("Reloading configuration from {:?}", path);

        let new_config = PortalConfig::load(path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Reload once per message on `triggers`, until every sender is dropped.
    /// A failed reload is logged and the previous config stays active.
    pub async fn reload_on(&self, mut triggers: mpsc::Receiver<()>) {
        while triggers.recv().await.is_some() {
            if let Err(e) = self.reload() {
                warn!("Configuration reload failed, keeping previous config: {}", e);
            }
        }
    }
}

impl Clone for PortalConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            config_path: self.config_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config(secret_env: &str) -> String {
        format!(
            r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
log_format = "json"

[auth]
jwt_secret_env = "{secret_env}"
jwt_access_expiry = 900

[backend]
latency_scale = 0.5
jitter_ms = 20

[assistant]
auto_navigate = false
"#
        )
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_parse_config() {
        let config = PortalConfig::parse(&create_test_config("CAMPUS_PARSE_SECRET"))
            .expect("Failed to parse config");

        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert!(config.server.json_logs());
        assert_eq!(config.auth.jwt_access_expiry, 900);
        assert_eq!(config.backend.latency().scale, 0.5);
        assert_eq!(config.backend.latency().jitter_ms, 20);
        assert!(!config.assistant.auto_navigate);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PortalConfig::parse("").expect("empty config parses");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, "pretty");
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.auth.jwt_access_expiry, 3600);
        assert_eq!(config.backend.latency_scale, 1.0);
        assert!(config.assistant.auto_navigate);
    }

    #[test]
    fn test_validation_missing_env_var() {
        let config = PortalConfig::parse(&create_test_config("CAMPUS_SECRET_NEVER_SET")).unwrap();

        match config.validate() {
            Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, "CAMPUS_SECRET_NEVER_SET"),
            other => panic!("expected missing env var, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        std::env::set_var("CAMPUS_VALIDATE_SECRET", "test-secret-at-least-32-characters-long");

        let mut config = PortalConfig::parse(&create_test_config("CAMPUS_VALIDATE_SECRET")).unwrap();
        assert!(config.validate().is_ok());

        config.backend.latency_scale = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.backend.latency_scale = 1.0;
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = PortalConfig::load("/definitely/not/here/campus.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("[server\nport = ");
        assert!(matches!(
            PortalConfig::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_manager_reload() {
        std::env::set_var("CAMPUS_RELOAD_SECRET", "test-secret-at-least-32-characters-long");

        let file = write_config(&create_test_config("CAMPUS_RELOAD_SECRET"));
        let manager = PortalConfigManager::new(file.path()).expect("manager loads");
        assert_eq!(manager.config().server.port, 8080);

        std::fs::write(
            file.path(),
            create_test_config("CAMPUS_RELOAD_SECRET").replace("8080", "9090"),
        )
        .unwrap();

        manager.reload().expect("reload succeeds");
        assert_eq!(manager.config().server.port, 9090);

        // A broken file keeps the last good config.
        std::fs::write(file.path(), "[server]\nport = 0\n").unwrap();
        assert!(manager.reload().is_err());
        assert_eq!(manager.config().server.port, 9090);
    }

    #[tokio::test]
    async fn test_reload_on_trigger() {
        std::env::set_var("CAMPUS_TRIGGER_SECRET", "test-secret-at-least-32-characters-long");

        let file = write_config(&create_test_config("CAMPUS_TRIGGER_SECRET"));
        let manager = Arc::new(PortalConfigManager::new(file.path()).expect("manager loads"));
        let (tx, rx) = mpsc::channel(4);
        let reloader = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.reload_on(rx).await }
        });

        std::fs::write(
            file.path(),
            create_test_config("CAMPUS_TRIGGER_SECRET")
                .replace("auto_navigate = false", "auto_navigate = true"),
        )
        .unwrap();
        tx.send(()).await.unwrap();

        drop(tx);
        reloader.await.expect("reloader finishes when triggers close");
        assert!(manager.config().assistant.auto_navigate);
    }

    #[test]
    fn test_from_config_reload_is_noop() {
        let manager = PortalConfigManager::from_config(PortalConfig::default());
        assert!(manager.path().is_none());
        assert!(manager.reload().is_ok());
        assert_eq!(manager.config().server.port, 3000);
    }
}
