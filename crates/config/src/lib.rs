//! Configuration loading, validation, and management for TaskLens.
//!
//! Loads configuration from `~/.tasklens/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.tasklens/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine backend: "lexical" (offline, deterministic) or "remote"
    /// (HTTP inference endpoint).
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL of the remote inference endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key for the remote endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifiers per capability.
    #[serde(default)]
    pub models: ModelsConfig,
}

fn default_backend() -> String {
    "lexical".into()
}
fn default_endpoint() -> String {
    "https://api-inference.huggingface.co".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("models", &self.models)
            .finish()
    }
}

/// Model identifiers for each engine role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Statement-scoring model (text-classification).
    #[serde(default = "default_classifier")]
    pub classifier: String,

    /// Task-extraction generation model (text2text-generation).
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Summarization model.
    #[serde(default = "default_summarizer")]
    pub summarizer: String,

    /// Next-task suggestion generation model (text2text-generation).
    #[serde(default = "default_suggester")]
    pub suggester: String,
}

fn default_classifier() -> String {
    "distilbert-base-uncased".into()
}
fn default_generator() -> String {
    "google/flan-t5-small".into()
}
fn default_summarizer() -> String {
    "sshleifer/distilbart-cnn-12-6".into()
}
fn default_suggester() -> String {
    "facebook/bart-base".into()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            classifier: default_classifier(),
            generator: default_generator(),
            summarizer: default_summarizer(),
            suggester: default_suggester(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.tasklens/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `TASKLENS_BACKEND` — backend selection
    /// - `TASKLENS_ENDPOINT` — remote endpoint base URL
    /// - `TASKLENS_API_KEY`, then `HF_API_TOKEN` — API key
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(backend) = std::env::var("TASKLENS_BACKEND") {
            config.backend = backend;
        }

        if let Ok(endpoint) = std::env::var("TASKLENS_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("TASKLENS_API_KEY")
                .ok()
                .or_else(|| std::env::var("HF_API_TOKEN").ok());
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".tasklens")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend != "lexical" && self.backend != "remote" {
            return Err(ConfigError::ValidationError(format!(
                "backend must be \"lexical\" or \"remote\", got \"{}\"",
                self.backend
            )));
        }

        if self.backend == "remote" && self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "endpoint must not be empty for the remote backend".into(),
            ));
        }

        for (role, model) in [
            ("classifier", &self.models.classifier),
            ("generator", &self.models.generator),
            ("summarizer", &self.models.summarizer),
            ("suggester", &self.models.suggester),
        ] {
            if model.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "models.{role} must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            endpoint: default_endpoint(),
            api_key: None,
            models: ModelsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, "lexical");
        assert_eq!(config.models.classifier, "distilbert-base-uncased");
        assert_eq!(config.models.generator, "google/flan-t5-small");
        assert_eq!(config.models.summarizer, "sshleifer/distilbart-cnn-12-6");
        assert_eq!(config.models.suggester, "facebook/bart-base");
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backend, config.backend);
        assert_eq!(parsed.models.classifier, config.models.classifier);
    }

    #[test]
    fn unknown_backend_rejected() {
        let config = AppConfig {
            backend: "quantum".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_model_rejected() {
        let mut config = AppConfig::default();
        config.models.summarizer = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("models.summarizer"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().backend, "lexical");
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "backend = \"remote\"\nendpoint = \"http://localhost:8080\"\n\n[models]\nclassifier = \"my-org/my-classifier\"\n"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.backend, "remote");
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.models.classifier, "my-org/my-classifier");
        // Unspecified models keep their defaults
        assert_eq!(config.models.generator, "google/flan-t5-small");
    }

    #[test]
    fn invalid_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend = \"nope\"").unwrap();
        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("lexical"));
        assert!(toml_str.contains("distilbert-base-uncased"));
    }
}
