//! Check command - report extractor tools and the working directory.

use super::load_config;
use anyhow::Result;
use colored::Colorize;
use doctext_core::SupportedFormat;
use doctext_ingest::ParserRegistry;

pub fn run() -> Result<()> {
    let (config, paths) = load_config()?;

    println!("{}", "Doctext Check".cyan().bold());
    println!("{}", "─".repeat(50));

    println!();
    println!("{}", "Formats".white().bold());
    let registry = ParserRegistry::from_config(&config);
    let formats: Vec<SupportedFormat> = registry
        .extensions()
        .into_iter()
        .filter_map(SupportedFormat::from_extension)
        .collect();
    for format in &formats {
        println!("  {} .{}", "●".green(), format);
    }

    println!();
    println!("{}", "External Tools".white().bold());
    let tools = external_tools(&formats, &config.extractors.doc_command);
    if tools.is_empty() {
        println!("  {} none required", "○".yellow());
    }
    for (name, available) in doctext_process::check_dependencies(&tools) {
        if available {
            println!("  {} {} (legacy .doc)", "✓".green(), name);
        } else {
            println!("  {} {} (legacy .doc) not found on PATH", "✗".red(), name);
        }
    }

    println!();
    println!("{}", "Working Directory".white().bold());
    let working_dir = config.working_dir(&paths);
    if working_dir.is_dir() {
        let leftovers = std::fs::read_dir(&working_dir)?.count();
        println!("  {} {}", "✓".green(), working_dir.display());
        if leftovers > 0 {
            println!(
                "  {} {} leftover file(s) from interrupted runs",
                "!".yellow(),
                leftovers
            );
        }
    } else {
        println!(
            "  {} {} (created on first extract)",
            "○".yellow(),
            working_dir.display()
        );
    }

    if !doctext_process::all_tools_available(&tools) {
        println!();
        println!(
            "{} .doc files will fail until the tool is installed or {} is changed.",
            "Note:".yellow().bold(),
            "extractors.doc_command".cyan()
        );
    }

    Ok(())
}

/// External commands needed by the enabled formats.
fn external_tools<'a>(formats: &[SupportedFormat], doc_command: &'a str) -> Vec<&'a str> {
    if formats.contains(&SupportedFormat::Doc) {
        vec![doc_command]
    } else {
        Vec::new()
    }
}
