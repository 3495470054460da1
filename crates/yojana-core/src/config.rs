//! Yojana configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Language;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub default_language: Language,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_language: Language::En,
            store: StoreConfig::default(),
            history: HistoryConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl AssistantConfig {
    /// Load config from the default path (~/.yojana/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::warn!("failed to read config {}: {e}", path.display());
            crate::error::YojanaError::Config(format!("Failed to read config: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            tracing::warn!("failed to parse config {}: {e}", path.display());
            crate::error::YojanaError::Config(format!("Failed to parse config: {e}"))
        })?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::error::YojanaError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Yojana home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".yojana")
    }
}

/// Scheme catalog storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub db_path: String,
}

fn default_store_path() -> String {
    "~/.yojana/schemes.db".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_store_path(),
        }
    }
}

/// Chat history storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub db_path: String,
    /// When false, no turns are logged at all.
    #[serde(default = "bool_true")]
    pub enabled: bool,
}

fn default_history_path() -> String {
    "~/.yojana/chat.db".into()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_history_path(),
            enabled: true,
        }
    }
}

/// External speech service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Speech-to-text endpoint (POST audio bytes, JSON transcription back).
    #[serde(default = "default_stt_url")]
    pub stt_url: String,
    /// Text-to-speech endpoint (POST text + language, audio bytes back).
    #[serde(default = "default_tts_url")]
    pub tts_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_stt_url() -> String {
    "http://localhost:9000/stt".into()
}

fn default_tts_url() -> String {
    "http://localhost:9000/tts".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn bool_true() -> bool {
    true
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stt_url: default_stt_url(),
            tts_url: default_tts_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.default_language, Language::En);
        assert!(config.history.enabled);
        assert!(!config.speech.enabled);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AssistantConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: AssistantConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.default_language, config.default_language);
        assert_eq!(back.store.db_path, config.store.db_path);
        assert_eq!(back.speech.stt_url, config.speech.stt_url);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AssistantConfig = toml::from_str("default_language = \"hi\"").unwrap();
        assert_eq!(config.default_language, Language::Hi);
        assert_eq!(config.store.db_path, "~/.yojana/schemes.db");
    }

    #[test]
    fn test_load_from_missing_file_is_a_config_error() {
        let err = AssistantConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, crate::error::YojanaError::Config(_)));
    }

    #[test]
    fn test_load_from_invalid_toml_is_a_config_error() {
        let path = std::env::temp_dir().join("yojana-bad-config.toml");
        std::fs::write(&path, "default_language = [not toml").unwrap();
        let err = AssistantConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::error::YojanaError::Config(_)));
        std::fs::remove_file(&path).ok();
    }
}
