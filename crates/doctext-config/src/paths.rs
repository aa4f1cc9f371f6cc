//! Application paths management.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Manages all application paths following platform conventions.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    /// Default location for in-flight working files.
    pub cache_dir: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "doctext", "doctext")?;

        let config_dir = proj_dirs.config_dir().to_path_buf();
        let data_dir = proj_dirs.data_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            cache_dir: data_dir.join("cache"),
            config_dir,
            data_dir,
        })
    }

    /// Root all paths under explicit directories (used by tests and `data_dir` overrides).
    pub fn with_roots(config_dir: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        let data_dir = data_dir.as_ref().to_path_buf();

        Self {
            config_file: config_dir.join("config.toml"),
            cache_dir: data_dir.join("cache"),
            config_dir,
            data_dir,
        }
    }

    /// Create all necessary directories.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        Ok(())
    }

    /// Check if doctext has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_paths_creation() {
        let paths = AppPaths::new();
        assert!(paths.is_some());

        let paths = paths.unwrap();
        assert!(paths.config_file.to_string_lossy().contains("config.toml"));
        assert!(paths.cache_dir.ends_with("cache"));
    }

    #[test]
    fn test_ensure_dirs() {
        let root = tempfile::tempdir().unwrap();
        let paths = AppPaths::with_roots(root.path().join("config"), root.path().join("data"));

        assert!(!paths.is_initialized());
        paths.ensure_dirs().unwrap();

        assert!(paths.config_dir.is_dir());
        assert!(paths.cache_dir.is_dir());
    }
}
