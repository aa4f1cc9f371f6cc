//! Doctext CLI - Extract plain text from PDF, DOCX and DOC files.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Doctext - Plain text from office documents
#[derive(Parser)]
#[command(name = "doctext")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Extract clean plain text from PDF, DOCX and DOC files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Doctext (create config and working directory)
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Check extractor tools and the working directory
    Check,

    /// Extract text from files or directories
    Extract {
        /// Files or directories to extract
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Files to process in parallel (default: from config)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Open config in editor
    Edit,

    /// Set a configuration value
    Set {
        /// Config key (e.g., ingest.working_dir)
        key: String,

        /// Value to set
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doctext=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doctext=info,warn"))
    };

    // Extracted text goes to stdout; keep logs out of it.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(),
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Edit => commands::config::edit(),
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value),
        },
        Commands::Check => commands::check::run(),
        Commands::Extract { paths, json, jobs } => commands::extract::run(&paths, json, jobs),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
