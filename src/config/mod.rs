//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in `PAYMENTS_CONFIG`)
//! overlaid by environment variables. Every field has a default, so an empty
//! environment yields a runnable in-memory server with card payments disabled.

use crate::core::StatusPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the optional YAML config path
pub const CONFIG_PATH_ENV: &str = "PAYMENTS_CONFIG";

/// Errors raised while applying configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("storage backend '{0}' requires the `{1}` feature")]
    BackendUnavailable(String, &'static str),
}

/// Which persistence backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Mongodb,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "mongodb" | "mongo" => Ok(StorageBackend::Mongodb),
            other => Err(format!(
                "unknown storage backend '{}', expected 'memory' or 'mongodb'",
                other
            )),
        }
    }
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: String,
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "payments".to_string(),
        }
    }
}

/// External processor settings
///
/// Without a secret key no processor is built and card payments are refused.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub secret_key: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl ProcessorConfig {
    pub fn is_configured(&self) -> bool {
        self.secret_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base: "https://api.stripe.com".to_string(),
            timeout_secs: 30,
        }
    }
}

// The secret key never reaches logs
impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "<redacted>"),
            )
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub storage: StorageConfig,
    pub processor: ProcessorConfig,
    pub status_policy: StatusPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            storage: StorageConfig::default(),
            processor: ProcessorConfig::default(),
            status_policy: StatusPolicy::Strict,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        check_timeout("processor.timeout_secs", config.processor.timeout_secs)?;
        Ok(config)
    }

    /// Load the YAML file named by `PAYMENTS_CONFIG` (if any), then apply
    /// the process environment on top.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };

        Ok(base.with_env_overrides(|key| std::env::var(key).ok())?)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(addr) = get("PAYMENTS_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(backend) = get("PAYMENTS_STORAGE") {
            self.storage.backend = backend
                .parse()
                .map_err(|message| invalid("PAYMENTS_STORAGE", &backend, message))?;
        }
        if let Some(uri) = get("MONGODB_URI") {
            self.storage.mongodb_uri = uri;
        }
        if let Some(database) = get("MONGODB_DATABASE") {
            self.storage.database = database;
        }
        if let Some(key) = get("STRIPE_SECRET_KEY") {
            self.processor.secret_key = Some(key);
        }
        if let Some(base) = get("STRIPE_API_BASE") {
            self.processor.api_base = base;
        }
        if let Some(timeout) = get("STRIPE_TIMEOUT_SECS") {
            self.processor.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    invalid("STRIPE_TIMEOUT_SECS", &timeout, e.to_string())
                })?;
            check_timeout("STRIPE_TIMEOUT_SECS", self.processor.timeout_secs)?;
        }
        if let Some(policy) = get("PAYMENTS_STATUS_POLICY") {
            self.status_policy = policy
                .parse()
                .map_err(|message| invalid("PAYMENTS_STATUS_POLICY", &policy, message))?;
        }

        Ok(self)
    }
}

/// A zero timeout would fail every processor call
fn check_timeout(key: &str, secs: u64) -> std::result::Result<(), ConfigError> {
    if secs == 0 {
        return Err(invalid(key, "0", "timeout must be at least one second".to_string()));
    }
    Ok(())
}

fn invalid(key: &str, value: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.processor.is_configured());
        assert_eq!(config.processor.timeout(), Duration::from_secs(30));
        assert_eq!(config.status_policy, StatusPolicy::Strict);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
listen_addr: "0.0.0.0:8080"
processor:
  secret_key: sk_test_123
status_policy: permissive
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert!(config.processor.is_configured());
        assert_eq!(config.processor.api_base, "https://api.stripe.com");
        assert_eq!(config.status_policy, StatusPolicy::Permissive);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "storage:\n  backend: mongodb\n  database: shop\n",
        )
        .unwrap();

        let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Mongodb);
        assert_eq!(config.storage.database, "shop");
        assert_eq!(config.storage.mongodb_uri, "mongodb://localhost:27017");
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::default()
            .with_env_overrides(env(&[
                ("PAYMENTS_LISTEN_ADDR", "0.0.0.0:9000"),
                ("PAYMENTS_STORAGE", "mongo"),
                ("MONGODB_URI", "mongodb://db:27017"),
                ("STRIPE_SECRET_KEY", "sk_live_abc"),
                ("STRIPE_TIMEOUT_SECS", "5"),
                ("PAYMENTS_STATUS_POLICY", "permissive"),
            ]))
            .unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.storage.backend, StorageBackend::Mongodb);
        assert_eq!(config.storage.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.processor.secret_key.as_deref(), Some("sk_live_abc"));
        assert_eq!(config.processor.timeout_secs, 5);
        assert_eq!(config.status_policy, StatusPolicy::Permissive);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = ServiceConfig::default()
            .with_env_overrides(env(&[("STRIPE_SECRET_KEY", ""), ("PAYMENTS_STORAGE", " ")]))
            .unwrap();

        assert!(!config.processor.is_configured());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = ServiceConfig::default()
            .with_env_overrides(env(&[("STRIPE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "STRIPE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ServiceConfig::default()
            .with_env_overrides(env(&[("STRIPE_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "STRIPE_TIMEOUT_SECS"));

        let yaml = "processor:\n  timeout_secs: 0\n";
        assert!(ServiceConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let processor = ProcessorConfig {
            secret_key: Some("sk_live_very_secret".to_string()),
            ..ProcessorConfig::default()
        };

        let debug = format!("{:?}", processor);
        assert!(!debug.contains("sk_live_very_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
