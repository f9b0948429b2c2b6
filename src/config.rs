//! YAML configuration file support.
//!
//! Every section is optional and falls back to the built-in defaults, so an
//! empty document (or no file at all) yields a working setup.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! store:
//!   path: "knowledge_base.json"
//!   create_if_missing: true
//!
//! canonical:
//!   version: 1
//!   strip_digits: true
//!   strip_punctuation: true
//!   lowercase: true
//!   stem: true
//!
//! matcher:
//!   cutoff: 0.5
//!   max_candidates: 3
//!
//! session:
//!   skip_token: "skip"
//!   history_limit: 200
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```
//!
//! ## Environment overrides
//!
//! [`KbqaConfig::load`] layers `KBQA__`-prefixed variables over the file,
//! with `__` separating section and key: `KBQA__STORE__PATH`,
//! `KBQA__LOGGING__LEVEL`, `KBQA__MATCHER__CUTOFF` and so on.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use canonical::NormalizeConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{SessionOptions, DEFAULT_SKIP_TOKEN};

/// Prefix of environment variables read by [`KbqaConfig::load`].
pub const ENV_PREFIX: &str = "KBQA";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to layer config sources: {0}")]
    Layered(#[from] ::config::ConfigError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a question-answering session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KbqaConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    #[serde(default)]
    pub store: StoreYamlConfig,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub session: SessionYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl KbqaConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        // serde_yaml reads an empty document as unit, not as an empty map.
        let config: KbqaConfig = if yaml.trim().is_empty() {
            KbqaConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the optional YAML file at `path`, then apply `KBQA__*`
    /// environment overrides. Empty variables are ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        Self::load_layered(path, None)
    }

    /// `env` replaces the process environment when given.
    fn load_layered(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigLoadError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder
                .add_source(::config::File::from(path).format(::config::FileFormat::Yaml));
        }
        let builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .ignore_empty(true)
                .source(env),
        );

        let config: KbqaConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.store.validate()?;
        self.canonical.validate()?;
        self.matcher.validate()?;
        self.session.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for KbqaConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            store: StoreYamlConfig::default(),
            canonical: CanonicalYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            session: SessionYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Knowledge base file location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreYamlConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Start from an empty knowledge base when the file does not exist yet.
    #[serde(default = "true_value")]
    pub create_if_missing: bool,
}

impl StoreYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "store.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreYamlConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            create_if_missing: true,
        }
    }
}

/// Normalization YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub strip_digits: bool,

    #[serde(default = "true_value")]
    pub strip_punctuation: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub stem: bool,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_normalize_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))
    }

    pub fn to_normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            version: self.version,
            strip_digits: self.strip_digits,
            strip_punctuation: self.strip_punctuation,
            lowercase: self.lowercase,
            stem: self.stem,
        }
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strip_digits: true,
            strip_punctuation: true,
            lowercase: true,
            stem: true,
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl MatchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_match_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }

    pub fn to_match_config(&self) -> MatchConfig {
        MatchConfig {
            cutoff: self.cutoff,
            max_candidates: self.max_candidates,
        }
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            max_candidates: default_max_candidates(),
        }
    }
}

/// Session YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionYamlConfig {
    #[serde(default = "default_skip_token")]
    pub skip_token: String,

    /// 0 keeps the whole transcript.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl SessionYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.skip_token.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "session.skip_token must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_session_options(&self) -> SessionOptions {
        SessionOptions {
            skip_token: self.skip_token.trim().to_string(),
            history_limit: self.history_limit,
        }
    }
}

impl Default for SessionYamlConfig {
    fn default() -> Self {
        Self {
            skip_token: default_skip_token(),
            history_limit: default_history_limit(),
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    /// An `EnvFilter` directive such as `info` or `kbqa=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Helper functions for serde defaults
fn default_format_version() -> String {
    "1.0".to_string()
}
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_store_path() -> PathBuf {
    PathBuf::from("knowledge_base.json")
}
fn default_cutoff() -> f64 {
    0.5
}
fn default_max_candidates() -> usize {
    3
}
fn default_skip_token() -> String {
    DEFAULT_SKIP_TOKEN.to_string()
}
fn default_history_limit() -> usize {
    200
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
store:
  path: "/var/lib/kbqa/kb.json"
matcher:
  cutoff: 0.6
session:
  skip_token: "pass"
"#;

        let config = KbqaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/var/lib/kbqa/kb.json"));
        assert!(config.store.create_if_missing);
        assert_eq!(config.matcher.cutoff, 0.6);
        assert_eq!(config.matcher.max_candidates, 3);
        assert_eq!(config.session.skip_token, "pass");
        assert_eq!(config.canonical, CanonicalYamlConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1.0"
logging:
  level: "debug"
  json: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = KbqaConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KbqaConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(KbqaConfig::from_yaml("").unwrap(), KbqaConfig::default());
        assert_eq!(
            KbqaConfig::from_yaml("version: \"1\"\n").unwrap().matcher,
            MatchYamlConfig::default()
        );
    }

    #[test]
    fn test_default_config() {
        let config = KbqaConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
        assert_eq!(config.canonical.to_normalize_config(), NormalizeConfig::default());
        assert_eq!(config.matcher.to_match_config(), MatchConfig::default());
        assert_eq!(config.session.to_session_options(), SessionOptions::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = KbqaConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_matcher_validation() {
        let yaml = r#"
matcher:
  cutoff: 1.5
"#;
        let result = KbqaConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("cutoff"));

        let yaml = r#"
matcher:
  max_candidates: 0
"#;
        let result = KbqaConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("max_candidates"));
    }

    #[test]
    fn test_canonical_validation() {
        let yaml = r#"
canonical:
  version: 0
"#;
        let result = KbqaConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_blank_skip_token_rejected() {
        let yaml = r#"
session:
  skip_token: "  "
"#;
        let result = KbqaConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("skip_token"));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = KbqaConfig::from_yaml("matcher: [unclosed");
        assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
    }

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_layered_file_and_env() {
        let yaml = r#"
version: "1.0"
store:
  path: "from-file.json"
  create_if_missing: false
matcher:
  cutoff: 0.7
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = KbqaConfig::load_layered(
            Some(temp_file.path()),
            env(&[
                ("KBQA__STORE__PATH", "/tmp/override.json"),
                ("KBQA__LOGGING__LEVEL", "kbqa=trace"),
            ]),
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/override.json"));
        assert!(!config.store.create_if_missing);
        assert_eq!(config.matcher.cutoff, 0.7);
        assert_eq!(config.logging.level, "kbqa=trace");
    }

    #[test]
    fn test_layered_without_sources_uses_defaults() {
        let config = KbqaConfig::load_layered(None, env(&[])).unwrap();
        assert_eq!(config, KbqaConfig::default());
    }

    #[test]
    fn test_empty_and_unprefixed_env_ignored() {
        let config = KbqaConfig::load_layered(
            None,
            env(&[
                ("KBQA__STORE__PATH", ""),
                ("KBQA_CONFIG", "elsewhere.yaml"),
                ("STORE__PATH", "elsewhere.json"),
            ]),
        )
        .unwrap();
        assert_eq!(config, KbqaConfig::default());
    }

    #[test]
    fn test_env_override_is_validated() {
        let result = KbqaConfig::load_layered(None, env(&[("KBQA__MATCHER__CUTOFF", "1.5")]));
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_layered_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let result = KbqaConfig::load_layered(Some(&path), env(&[]));
        assert!(matches!(result, Err(ConfigLoadError::Layered(_))));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let yaml = r#"
version: "1.0"
store:
  path: "kb.json"
  create_if_missing: false
canonical:
  version: 1
  strip_digits: false
  strip_punctuation: true
  lowercase: true
  stem: false
matcher:
  cutoff: 0.75
  max_candidates: 5
session:
  skip_token: "skip"
  history_limit: 0
logging:
  level: "warn"
  json: true
"#;

        let config = KbqaConfig::from_yaml(yaml).unwrap();
        let rendered = serde_yaml::to_string(&config).unwrap();
        assert_eq!(KbqaConfig::from_yaml(&rendered).unwrap(), config);

        assert!(!config.store.create_if_missing);
        assert!(!config.canonical.strip_digits);
        assert!(!config.canonical.stem);
        assert_eq!(config.matcher.max_candidates, 5);
        assert_eq!(config.session.history_limit, 0);
        assert_eq!(config.logging.level, "warn");
    }
}
