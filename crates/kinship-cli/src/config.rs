//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use kinship_inference::InferenceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database file (defaults to `~/.kinship/kinship.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Inference policy
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration directory.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".kinship"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path` (or the default location), falling
    /// back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config
                .inference
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Resolve the database file, with `override_path` taking precedence.
    pub fn database_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("kinship.db")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.inference.unspecified_sex_parent_label, "father");
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            database = "/var/lib/kinship/family.db"

            [inference]
            unspecified_sex_parent_label = "mother"
            "#,
        )
        .unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/var/lib/kinship/family.db")));
        assert_eq!(config.settings.log_level, "warn");
        assert!(!config.inference.strict_single_spouse);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.inference.strict_single_spouse = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert!(loaded.inference.strict_single_spouse);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_parent_label_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[inference]\nunspecified_sex_parent_label = \"uncle\"\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_database_override() {
        let config = Config {
            database: Some(PathBuf::from("configured.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(Some(Path::new("flag.db"))).unwrap(),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.database_path(None).unwrap(), PathBuf::from("configured.db"));
    }
}
