//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub extractors: ExtractorConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&paths.config_file)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        let default_config = Self::default_config_string();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, default_config)?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Doctext Configuration
# Text extraction for PDF, DOCX and legacy DOC uploads

[general]
# Data directory (working files live under <data_dir>/cache by default)
# data_dir = "~/.local/share/doctext"

[ingest]
# Where uploads are written while they are being parsed.
# Files here are deleted as soon as extraction finishes.
# working_dir = "~/.cache/doctext"

# Extensions accepted for extraction (lowercase, no dot)
allowed_extensions = ["pdf", "doc", "docx"]

# Files processed in parallel by `doctext extract`
max_concurrent_jobs = 2

[extractors]
# External tool used for legacy .doc files. It receives the file path as
# its last argument and must print UTF-8 text to stdout.
doc_command = "antiword"
doc_args = []

[ui]
# Enable colored output
color = true
"#
        .to_string()
    }

    /// Check values that serde can't.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ingest.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "ingest.allowed_extensions must not be empty".to_string(),
            ));
        }

        for ext in &self.ingest.allowed_extensions {
            if ext.is_empty() || ext.contains('.') || *ext != ext.to_lowercase() {
                return Err(ConfigError::Invalid(format!(
                    "ingest.allowed_extensions entry {:?} must be a lowercase extension without a dot",
                    ext
                )));
            }
        }

        if self.ingest.max_concurrent_jobs == 0 {
            return Err(ConfigError::Invalid(
                "ingest.max_concurrent_jobs must be at least 1".to_string(),
            ));
        }

        if self.extractors.doc_command.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "extractors.doc_command must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the application paths, honoring a `general.data_dir` override.
    pub fn resolve_paths(&self) -> ConfigResult<AppPaths> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Ok(match &self.general.data_dir {
            Some(dir) => AppPaths::with_roots(&paths.config_dir, expand(dir)),
            None => paths,
        })
    }

    /// The directory working files are written to.
    pub fn working_dir(&self, paths: &AppPaths) -> PathBuf {
        match &self.ingest.working_dir {
            Some(dir) => expand(dir),
            None => paths.cache_dir.clone(),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
}

/// Upload handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub working_dir: Option<String>,
    pub allowed_extensions: Vec<String>,
    pub max_concurrent_jobs: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            working_dir: None,
            allowed_extensions: vec!["pdf".to_string(), "doc".to_string(), "docx".to_string()],
            max_concurrent_jobs: 2,
        }
    }
}

/// External extraction tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub doc_command: String,
    pub doc_args: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            doc_command: "antiword".to_string(),
            doc_args: vec![],
        }
    }
}

/// UI/Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ingest.allowed_extensions, vec!["pdf", "doc", "docx"]);
        assert_eq!(config.extractors.doc_command, "antiword");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_file_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.ingest.max_concurrent_jobs, 2);
        assert!(config.ingest.working_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.ingest.working_dir = Some("/srv/uploads".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.ingest.working_dir.as_deref(), Some("/srv/uploads"));
        assert_eq!(config.extractors.doc_command, deserialized.extractors.doc_command);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [ingest]
            allowed_extensions = ["pdf"]
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.ingest.allowed_extensions, vec!["pdf"]);
        // Defaults should still work
        assert_eq!(config.ingest.max_concurrent_jobs, 2);
        assert_eq!(config.extractors.doc_command, "antiword");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.ingest.allowed_extensions.len(), 3);
    }

    #[test]
    fn test_validate_rejects_bad_extensions() {
        let mut config = Config::default();
        config.ingest.allowed_extensions = vec![".pdf".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.ingest.allowed_extensions = vec!["PDF".to_string()];
        assert!(config.validate().is_err());

        config.ingest.allowed_extensions = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let mut config = Config::default();
        config.ingest.max_concurrent_jobs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_working_dir_override() {
        let paths = AppPaths::with_roots("/etc/doctext", "/var/lib/doctext");
        let mut config = Config::default();
        assert_eq!(config.working_dir(&paths), PathBuf::from("/var/lib/doctext/cache"));

        config.ingest.working_dir = Some("/tmp/uploads".to_string());
        assert_eq!(config.working_dir(&paths), PathBuf::from("/tmp/uploads"));
    }
}
