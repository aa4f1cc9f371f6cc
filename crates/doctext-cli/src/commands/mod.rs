//! CLI command implementations.

pub mod check;
pub mod config;
pub mod extract;
pub mod init;

use anyhow::{Context, Result};
use doctext_config::{AppPaths, Config};

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// Load the configuration (defaults if no file exists) and the paths it resolves to.
pub fn load_config() -> Result<(Config, AppPaths)> {
    let paths = get_paths()?;
    let config = Config::load_from(&paths.config_file).context("Failed to load config")?;
    let paths = config.resolve_paths().context("Failed to resolve data directory")?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    Ok((config, paths))
}

/// Format a byte count in human-readable form.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
