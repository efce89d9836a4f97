//! # Configuration
//!
//! `AppConfig` is assembled in three layers, later layers win:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`skillmatrix.toml` in the working directory, or
//!    the path given with `--config`)
//! 3. `SKILLMATRIX_*` environment variables
//!
//! ```toml
//! [analysis]
//! training_cost_per_level = 5000.0
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//! api_key = "secret"
//! cors_origins = "http://localhost:3000"
//!
//! [logging]
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use skillmatrix_core::primitives::DEFAULT_TRAINING_COST_PER_LEVEL;
use skillmatrix_core::workforce::check_cost_per_level;
use skillmatrix_core::{Money, WorkforceError};
use std::path::Path;

/// Config file picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "skillmatrix.toml";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// CONFIG SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Major currency units.
    pub training_cost_per_level: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            training_cost_per_level: DEFAULT_TRAINING_COST_PER_LEVEL.to_major(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Bearer key required on every endpoint except `/health`.
    pub api_key: Option<String>,
    /// Comma-separated origins, or `*`. Localhost only when unset.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            api_key: None,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// The configured API key, ignoring an empty one.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Load defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, WorkforceError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file over the defaults.
    pub fn from_file(path: &Path) -> Result<Self, WorkforceError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            WorkforceError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(WorkforceError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            WorkforceError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, WorkforceError> {
        toml::from_str(text).map_err(|e| WorkforceError::ConfigError(e.to_string()))
    }

    /// Overlay `SKILLMATRIX_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), WorkforceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SKILLMATRIX_COST_PER_LEVEL") {
            self.analysis.training_cost_per_level = parse_var("SKILLMATRIX_COST_PER_LEVEL", &value)?;
        }
        if let Some(value) = lookup("SKILLMATRIX_HOST") {
            self.server.host = value;
        }
        if let Some(value) = lookup("SKILLMATRIX_PORT") {
            self.server.port = parse_var("SKILLMATRIX_PORT", &value)?;
        }
        if let Some(value) = lookup("SKILLMATRIX_RATE_LIMIT") {
            self.server.rate_limit = parse_var("SKILLMATRIX_RATE_LIMIT", &value)?;
        }
        if let Some(value) = lookup("SKILLMATRIX_API_KEY") {
            self.server.api_key = Some(value);
        }
        if let Some(value) = lookup("SKILLMATRIX_CORS_ORIGINS") {
            self.server.cors_origins = Some(value);
        }
        if let Some(value) = lookup("SKILLMATRIX_LOG_FORMAT") {
            self.logging.format = match value.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                other => {
                    return Err(WorkforceError::ConfigError(format!(
                        "SKILLMATRIX_LOG_FORMAT: unknown format '{other}'"
                    )));
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), WorkforceError> {
        self.cost_per_level().map(|_| ())
    }

    /// The configured training cost per level in minor units.
    pub fn cost_per_level(&self) -> Result<Money, WorkforceError> {
        resolve_cost_per_level(self.analysis.training_cost_per_level)
            .map_err(|e| WorkforceError::ConfigError(format!("training_cost_per_level: {e}")))
    }
}

/// Convert a major-unit cost per level and reject negative values.
pub fn resolve_cost_per_level(major: f64) -> Result<Money, WorkforceError> {
    check_cost_per_level(Money::from_major_f64(major)?)
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, WorkforceError> {
    value
        .trim()
        .parse()
        .map_err(|_| WorkforceError::ConfigError(format!("{key}: invalid value '{value}'")))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.rate_limit, 100);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(
            config.cost_per_level().expect("valid"),
            DEFAULT_TRAINING_COST_PER_LEVEL
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("[server]\nport = 9090\n").expect("parse");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AppConfig::from_toml("[server]\nprot = 1\n").expect_err("typo");
        assert!(matches!(err, WorkforceError::ConfigError(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            AppConfig::from_toml("[analysis]\ntraining_cost_per_level = 100.0\n").expect("parse");
        config
            .apply_env(env(&[
                ("SKILLMATRIX_COST_PER_LEVEL", "250.5"),
                ("SKILLMATRIX_PORT", "7000"),
                ("SKILLMATRIX_LOG_FORMAT", "JSON"),
                ("SKILLMATRIX_API_KEY", "k"),
            ]))
            .expect("valid env");
        assert_eq!(config.cost_per_level().expect("valid"), Money::from_minor(25_050));
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.api_key(), Some("k"));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("SKILLMATRIX_PORT", "eighty")]))
            .expect_err("invalid port");
        assert!(err.to_string().contains("SKILLMATRIX_PORT"));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let config =
            AppConfig::from_toml("[analysis]\ntraining_cost_per_level = -1.0\n").expect("parse");
        assert!(matches!(
            config.validate(),
            Err(WorkforceError::ConfigError(_))
        ));
    }

    #[test]
    fn test_empty_api_key_disables_auth() {
        let mut config = AppConfig::default();
        config.server.api_key = Some(String::new());
        assert_eq!(config.server.api_key(), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[logging]\nformat = \"json\"").expect("write");
        let config = AppConfig::from_file(file.path()).expect("load");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).expect_err("missing");
        assert!(matches!(err, WorkforceError::ConfigError(_)));
    }
}
