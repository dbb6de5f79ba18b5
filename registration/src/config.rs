//! Workflow configuration: YAML file, defaults for anything missing, then
//! environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::admission::{QuestionBank, DEFAULT_PASS_MARK};
use crate::util::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// No base URL means applications stay in memory.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

/// Question bank used when nothing else is configured, relative to the
/// workspace root.
pub const DEFAULT_QUESTIONS_PATH: &str = "registration/metadata/admission_questions.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Relative paths in a config file resolve against that file's directory.
    pub questions_path: Option<PathBuf>,
    pub pass_mark: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub gateway: GatewayConfig,
    pub admission: AdmissionConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: None,
            timeout_secs: 15,
            api_key: None,
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        AdmissionConfig {
            questions_path: None,
            pass_mark: DEFAULT_PASS_MARK,
        }
    }
}

impl RegistrationConfig {
    /// Load `path` (defaults when absent) and apply `REGISTRATION_*`
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path).with_context(|| format!("loading {}", path.display()))?
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        info!(gateway = ?config.gateway.base_url, "configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;

        if let (Some(questions), Some(dir)) = (&mut config.admission.questions_path, path.parent()) {
            if questions.is_relative() {
                *questions = dir.join(&*questions);
            }
        }
        Ok(config)
    }

    /// Unparsable numeric values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("REGISTRATION_GATEWAY_URL") {
            self.gateway.base_url = Some(url);
        }
        if let Some(timeout) = lookup("REGISTRATION_GATEWAY_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.gateway.timeout_secs = secs,
                Err(_) => warn!(%timeout, "ignoring REGISTRATION_GATEWAY_TIMEOUT_SECS"),
            }
        }
        if let Some(key) = lookup("REGISTRATION_API_KEY") {
            self.gateway.api_key = Some(key);
        }
        if let Some(path) = lookup("REGISTRATION_QUESTIONS_PATH") {
            self.admission.questions_path = Some(PathBuf::from(path));
        }
        if let Some(mark) = lookup("REGISTRATION_PASS_MARK") {
            match mark.parse::<u32>() {
                Ok(mark) => self.admission.pass_mark = mark,
                Err(_) => warn!(%mark, "ignoring REGISTRATION_PASS_MARK"),
            }
        }
    }

    pub fn questions_path(&self) -> PathBuf {
        self.admission
            .questions_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_PATH))
    }

    pub fn question_bank(&self) -> Result<QuestionBank, ConfigError> {
        QuestionBank::load(&self.questions_path(), self.admission.pass_mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RegistrationConfig::from_file(&dir.path().join("absent.yaml"));
        assert!(matches!(config, Err(ConfigError::Io { .. })));

        let mut config = RegistrationConfig::default();
        config.apply_overrides(|_| None);
        assert_eq!(config.gateway.timeout_secs, 15);
        assert_eq!(config.gateway.base_url, None);
        assert_eq!(config.admission.pass_mark, DEFAULT_PASS_MARK);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  base_url: \"https://api.example.com\"").unwrap();

        let config = RegistrationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.gateway.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.gateway.timeout_secs, 15);
        assert_eq!(config.admission, AdmissionConfig::default());
    }

    #[test]
    fn env_overrides_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  base_url: \"https://file.example.com\"\n  timeout_secs: 5").unwrap();
        let mut config = RegistrationConfig::from_file(file.path()).unwrap();

        let env = HashMap::from([
            ("REGISTRATION_GATEWAY_URL", "https://env.example.com"),
            ("REGISTRATION_GATEWAY_TIMEOUT_SECS", "not-a-number"),
            ("REGISTRATION_PASS_MARK", "80"),
        ]);
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.gateway.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.gateway.timeout_secs, 5);
        assert_eq!(config.admission.pass_mark, 80);
    }

    #[test]
    fn broken_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway: [unclosed").unwrap();
        assert!(matches!(
            RegistrationConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn sample_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("metadata/registration.yaml");
        let config = RegistrationConfig::from_file(&path).unwrap();
        assert_eq!(config.gateway.base_url.as_deref(), Some("http://localhost:8080"));

        // Loads no matter which directory the test runs from
        let bank = config.question_bank().unwrap();
        assert!(!bank.questions().is_empty());
    }

    #[test]
    fn questions_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registration.yaml");
        std::fs::write(&path, "admission:\n  questions_path: \"bank/questions.yaml\"\n").unwrap();

        let config = RegistrationConfig::from_file(&path).unwrap();
        assert_eq!(config.questions_path(), dir.path().join("bank/questions.yaml"));

        let absolute = dir.path().join("elsewhere.yaml");
        let yaml = format!("admission:\n  questions_path: \"{}\"\n", absolute.display());
        std::fs::write(&path, yaml).unwrap();
        let config = RegistrationConfig::from_file(&path).unwrap();
        assert_eq!(config.questions_path(), absolute);

        assert_eq!(
            RegistrationConfig::default().questions_path(),
            PathBuf::from(DEFAULT_QUESTIONS_PATH)
        );
    }
}
