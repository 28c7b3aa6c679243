//! Configuration management for peershell.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::session::Session;
use crate::shell::CommandSet;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shell configuration.
    pub shell: ShellSection,
    /// Initial session state.
    pub session: SessionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Shell configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    /// Prompt string, printed without a trailing newline.
    pub prompt: String,
    /// Command table to expose: "basic" or "extended".
    pub command_set: String,
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            command_set: "extended".to_string(),
        }
    }
}

/// Initial session state section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Identity file to remember at startup (not loaded automatically).
    pub identity: Option<String>,
    /// Initial autosave policy flag.
    pub autosave: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(identity) = std::env::var("PEERSHELL_IDENTITY") {
            if !identity.is_empty() {
                self.session.identity = Some(identity);
            }
        }

        if let Ok(level) = std::env::var("PEERSHELL_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref identity) = args.identity {
            self.session.identity = Some(identity.clone());
        }

        if args.basic {
            self.shell.command_set = "basic".to_string();
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args);

        Ok(config)
    }

    /// The command set named by the config, or an error for unknown names.
    pub fn command_set(&self) -> Result<CommandSet, ConfigError> {
        CommandSet::parse(&self.shell.command_set)
            .ok_or_else(|| ConfigError::InvalidCommandSet(self.shell.command_set.clone()))
    }

    /// Build the initial session record.
    pub fn initial_session(&self) -> Session {
        Session {
            identity_path: self.session.identity.clone(),
            autosave: self.session.autosave,
            connected: false,
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Unknown command set name.
    InvalidCommandSet(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidCommandSet(name) => write!(f, "unknown command set: {}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.shell.prompt, "> ");
        assert_eq!(config.shell.command_set, "extended");
        assert!(config.session.identity.is_none());
        assert!(!config.session.autosave);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "shell": {
                "prompt": "peer> ",
                "command_set": "basic"
            },
            "session": {
                "identity": "alice.tox",
                "autosave": true
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.shell.prompt, "peer> ");
        assert_eq!(config.command_set().unwrap(), CommandSet::Basic);
        assert_eq!(config.session.identity.as_deref(), Some("alice.tox"));
        assert!(config.session.autosave);
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{
            "session": {
                "autosave": true
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.shell.prompt, "> "); // Default
        assert!(config.session.autosave);
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            identity: Some("bob.tox".to_string()),
            basic: true,
            log_level: Some("debug".to_string()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.session.identity.as_deref(), Some("bob.tox"));
        assert_eq!(config.command_set().unwrap(), CommandSet::Basic);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_command_set() {
        let mut config = Config::default();
        config.shell.command_set = "haute-cuisine".to_string();
        assert!(config.command_set().is_err());
    }

    #[test]
    fn test_initial_session() {
        let mut config = Config::default();
        config.session.identity = Some("alice.tox".to_string());
        config.session.autosave = true;

        let session = config.initial_session();
        assert_eq!(session.identity_path.as_deref(), Some("alice.tox"));
        assert!(session.autosave);
        assert!(!session.connected);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"prompt\""));
        assert!(json.contains("\"command_set\""));
    }
}
