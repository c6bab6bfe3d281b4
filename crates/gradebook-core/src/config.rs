//! Runtime configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::validate_name;

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "gradebook.toml";

/// Environment variable that overrides [`GradebookConfig::log_file`].
pub const LOG_FILE_ENV: &str = "GRADEBOOK_LOG_FILE";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Where operation log lines are appended.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Student used by the demo run.
    #[serde(default = "default_student_name")]
    pub student_name: String,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("program.log")
}

fn default_student_name() -> String {
    "Ivan Ivanov".to_string()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            student_name: default_student_name(),
        }
    }
}

/// Load config from an explicit path, or from `gradebook.toml` in the current
/// directory if present, falling back to defaults.
///
/// `GRADEBOOK_LOG_FILE` overrides the log file in every case.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => GradebookConfig::default(),
    };

    if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
        if !log_file.is_empty() {
            config.log_file = PathBuf::from(log_file);
        }
    }

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GradebookConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Parse and validate a TOML config string.
pub fn parse_config_str(content: &str) -> Result<GradebookConfig> {
    let config: GradebookConfig = toml::from_str(content)?;
    validate_name(&config.student_name)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.log_file, PathBuf::from("program.log"));
        assert_eq!(config.student_name, "Ivan Ivanov");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = parse_config_str(r#"log_file = "logs/run.log""#).unwrap();
        assert_eq!(config.log_file, PathBuf::from("logs/run.log"));
        assert_eq!(config.student_name, "Ivan Ivanov");
    }

    #[test]
    fn config_student_name_is_validated() {
        let err = parse_config_str(r#"student_name = "anna""#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidName(_))
        ));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config_from(Some(&dir.path().join("gradebook.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "student_name = \"Anna Petrova\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.student_name, "Anna Petrova");
    }
}
