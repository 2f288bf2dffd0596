//! Application settings and configuration types.
//!
//! Settings are persisted to `~/.config/mail-labeler/settings.json` (or the
//! platform equivalent) and loaded at startup. A missing file yields defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{Matcher, RuleRegistry, DEFAULT_KEYWORD_CONFIDENCE};

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no home directory available")]
    NoHomeDir,
}

/// Top-level application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database location.
    pub database: DatabaseSettings,
    /// Matching policy and extra rules.
    pub classifier: ClassifierSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or(SettingsError::NoHomeDir)
    }

    /// Loads settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Database configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to the platform data directory when unset.
    pub path: Option<PathBuf>,
}

impl DatabaseSettings {
    /// Resolves the database file location.
    pub fn resolve_path(&self) -> Result<PathBuf, SettingsError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("email_analysis.db"))
            .ok_or(SettingsError::NoHomeDir)
    }
}

/// Classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Confidence assigned to every keyword hit.
    pub keyword_confidence: f64,
    /// Rules applied on top of the built-in defaults, in order.
    pub rules: Vec<RuleSettings>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            keyword_confidence: DEFAULT_KEYWORD_CONFIDENCE,
            rules: Vec::new(),
        }
    }
}

impl ClassifierSettings {
    /// Builds the matcher for the configured confidence.
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.keyword_confidence)
    }

    /// Builds a registry from the built-in rules plus configured ones.
    pub fn registry(&self) -> RuleRegistry {
        let registry = RuleRegistry::new();
        for rule in &self.rules {
            registry.add_rule(rule.label.as_str(), rule.keywords.iter().cloned());
        }
        registry
    }
}

/// A configured keyword rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "mail-labeler")
}
