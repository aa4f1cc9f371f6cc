//! Configuration commands.

use super::get_paths;
use anyhow::{Context, Result};
use colored::Colorize;
use doctext_config::Config;
use std::process::Command;

pub fn show() -> Result<()> {
    let paths = get_paths()?;

    if !paths.config_file.exists() {
        anyhow::bail!("Config file not found. Run 'doctext init' first.");
    }

    let contents = std::fs::read_to_string(&paths.config_file)
        .context("Failed to read config file")?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));
    println!("{}", contents);

    Ok(())
}

pub fn path() -> Result<()> {
    let paths = get_paths()?;
    println!("{}", paths.config_file.display());
    Ok(())
}

pub fn edit() -> Result<()> {
    let paths = get_paths()?;

    if !paths.config_file.exists() {
        anyhow::bail!("Config file not found. Run 'doctext init' first.");
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            "nano".to_string()
        }
    });

    let parts: Vec<&str> = editor.split_whitespace().collect();
    let (cmd, args) = parts.split_first().context("Invalid editor command")?;

    let status = Command::new(cmd)
        .args(args)
        .arg(&paths.config_file)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with error");
    }

    Config::load_from(&paths.config_file).context("Edited config is invalid")?;

    println!("{} Configuration saved.", "✓".green());

    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let paths = get_paths()?;

    let mut config = Config::load_from(&paths.config_file)
        .context("Failed to load config")?;

    apply(&mut config, key, value)?;
    config.validate().context("Invalid value")?;

    config.save_to(&paths.config_file)
        .context("Failed to save config")?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);

    Ok(())
}

/// Apply a dotted `key = value` assignment.
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "data_dir"] => config.general.data_dir = Some(value.to_string()),
        ["ingest", "working_dir"] => config.ingest.working_dir = Some(value.to_string()),
        ["ingest", "allowed_extensions"] => {
            config.ingest.allowed_extensions = value
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
        ["ingest", "max_concurrent_jobs"] => {
            config.ingest.max_concurrent_jobs = value
                .parse()
                .context("Invalid max_concurrent_jobs value")?;
        }
        ["extractors", "doc_command"] => config.extractors.doc_command = value.to_string(),
        ["extractors", "doc_args"] => {
            config.extractors.doc_args = value.split_whitespace().map(String::from).collect();
        }
        ["ui", "color"] => {
            config.ui.color = value.parse().context("Invalid boolean value")?;
        }
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    }

    Ok(())
}
