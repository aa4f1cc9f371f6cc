//! Initialize Doctext.

use super::get_paths;
use anyhow::{Context, Result};
use colored::Colorize;
use doctext_config::Config;

pub fn run() -> Result<()> {
    let paths = get_paths()?;

    // Check if already initialized
    if paths.is_initialized() {
        println!(
            "{} Doctext is already initialized.",
            "Note:".yellow().bold()
        );
        println!("  Config: {}", paths.config_file.display());
        return Ok(());
    }

    println!("{}", "Initializing Doctext...".cyan().bold());

    paths
        .ensure_dirs()
        .context("Failed to create directories")?;
    println!("  {} Created directories", "✓".green());

    Config::create_default_file(&paths.config_file)
        .context("Failed to create config file")?;
    println!(
        "  {} Created config: {}",
        "✓".green(),
        paths.config_file.display()
    );
    println!(
        "  {} Working directory: {}",
        "✓".green(),
        paths.cache_dir.display()
    );

    println!();
    println!("{}", "Doctext initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Check extractor tools: {}", "doctext check".cyan());
    println!("  2. Extract a document: {}", "doctext extract report.pdf".cyan());

    Ok(())
}
