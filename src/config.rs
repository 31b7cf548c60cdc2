// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main server configuration, loaded from `config.toml`.
///
/// Every field has a default so an empty file (or a missing one) yields a
/// runnable configuration. The Gemini API key is deliberately not part of
/// the file: `[llm] api_key_env` names the environment variable to read it
/// from instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path to the pre-populated SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

/// Generative model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the given path when it exists, otherwise fall back to
    /// defaults. A present-but-invalid file is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

impl LlmSettings {
    /// Resolve the API key from the environment variable named in config.
    /// Fails fast so a misconfigured server never reaches the bind step.
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!(
                "Gemini API key not found: set the {} environment variable",
                self.api_key_env
            ),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { db_path: default_db_path() }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_llm_base_url(),
            timeout_seconds: default_llm_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_console: default_true(),
            logs_path: default_logs_path(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    2
}

fn default_db_path() -> String {
    "ecommerce.db".to_string()
}

fn default_model() -> String {
    askdb_core::llm::DEFAULT_MODEL.to_string()
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_logs_path() -> String {
    "data/logs".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.db_path, "ecommerce.db");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [storage]
            db_path = "/data/sales.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.db_path, "/data/sales.db");
        assert_eq!(config.llm.timeout_seconds, 60);
    }

    #[test]
    fn api_key_resolution_fails_when_env_var_is_unset() {
        let settings = LlmSettings {
            api_key_env: "ASKDB_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmSettings::default()
        };
        let err = settings.resolve_api_key().unwrap_err();
        assert!(err.to_string().contains("ASKDB_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(toml::from_str::<ServerConfig>("[server]\nport = \"not a number\"").is_err());
    }
}
