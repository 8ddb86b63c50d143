//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Media server base URL
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Username for login (optional if a token is stored)
    #[serde(default)]
    pub username: Option<String>,
    /// Bearer token from a previous login
    #[serde(default)]
    pub token: Option<String>,
    /// Directory that captured JSON responses are written to
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Pause between phases of the lifecycle scenarios, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_pause_ms() -> u64 {
    1000
}

/// Error types for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(String),
    ValidationError(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::ParseError(s) => write!(f, "Parse error: {}", s),
            ConfigError::ValidationError(s) => write!(f, "Validation error: {}", s),
        }
    }
}

impl Error for ConfigError {}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_url: default_server_url(),
            username: None,
            token: None,
            save_dir: None,
            pause_ms: default_pause_ms(),
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Store `token` in the file at `path`, keeping every other stored value
    /// as it is on disk.
    pub fn save_token(path: &Path, token: &str) -> Result<(), ConfigError> {
        let mut stored = Self::load(path)?;
        stored.token = Some(token.to_string());
        stored.save(path)
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("abs-probe").join("config.json")
    }

    /// Overlay values given on the command line or in the environment.
    pub fn apply_overrides(
        &mut self,
        server_url: Option<String>,
        username: Option<String>,
        token: Option<String>,
        save_dir: Option<PathBuf>,
        pause_ms: Option<u64>,
    ) {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        if username.is_some() {
            self.username = username;
        }
        if token.is_some() {
            self.token = token;
        }
        if save_dir.is_some() {
            self.save_dir = save_dir;
        }
        if let Some(pause_ms) = pause_ms {
            self.pause_ms = pause_ms;
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.is_empty() {
            return Err(ConfigError::ValidationError("Server URL cannot be empty".to_string()));
        }

        let url = Url::parse(&self.server_url).map_err(|e| {
            ConfigError::ValidationError(format!("Server URL '{}' is invalid: {}", self.server_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "Server URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.token.is_none() && self.username.is_none() {
            return Err(ConfigError::ValidationError(
                "Either a token or a username must be provided".to_string(),
            ));
        }

        Ok(())
    }
}
