//! Extract command implementation.

use super::{format_size, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use doctext_core::{extension_of, FailureKind, IngestionResult};
use doctext_ingest::{
    cancellation, CancellationSignal, DocumentIngestionService, IngestionRequest,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// One processed input file.
struct Extraction {
    path: PathBuf,
    bytes: u64,
    result: IngestionResult,
}

/// Extract text from files and directories.
pub fn run(inputs: &[String], json: bool, jobs: Option<usize>) -> Result<()> {
    let (config, paths) = load_config()?;
    let service = DocumentIngestionService::from_config(&config, &paths)
        .context("Failed to start ingestion service")?;

    let files = collect_files(inputs, &service)?;
    if files.is_empty() {
        println!("{}", "No supported files found.".yellow());
        return Ok(());
    }

    let jobs = jobs.unwrap_or(config.ingest.max_concurrent_jobs).max(1);
    let show_progress = !json && files.len() > 1;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let extractions = runtime.block_on(extract_all(Arc::new(service), files, jobs, show_progress))?;

    if json {
        print_json(&extractions)?;
    } else {
        print_text(&extractions);
    }

    let failed = extractions.iter().filter(|e| !e.result.is_success()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, extractions.len());
    }

    Ok(())
}

/// Expand directories and check that every input exists.
///
/// Files named explicitly are always processed; files found by walking a
/// directory are limited to registered formats.
fn collect_files(inputs: &[String], service: &DocumentIngestionService) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let found = walkdir::WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .filter(|e| {
                    // Skip hidden files
                    !e.file_name().to_string_lossy().starts_with('.')
                })
                .filter(|e| {
                    extension_of(&e.file_name().to_string_lossy())
                        .map(|ext| service.registry().resolve(&ext).is_ok())
                        .unwrap_or(false)
                })
                .map(|e| e.into_path());
            files.extend(found);
        } else {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    Ok(files)
}

async fn extract_all(
    service: Arc<DocumentIngestionService>,
    files: Vec<PathBuf>,
    jobs: usize,
    show_progress: bool,
) -> Result<Vec<Extraction>> {
    let (handle, signal) = cancellation();
    let semaphore = Arc::new(Semaphore::new(jobs));

    let pb = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining files");
            handle.cancel();
        }
    });

    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        let service = Arc::clone(&service);
        let semaphore = Arc::clone(&semaphore);
        let signal = signal.clone();
        let pb = pb.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let extraction =
                tokio::task::spawn_blocking(move || extract_one(&service, path, &signal)).await?;

            pb.set_message(display_name(&extraction.path));
            pb.inc(1);
            Ok::<_, anyhow::Error>(extraction)
        }));
    }

    let mut extractions = Vec::with_capacity(tasks.len());
    for task in tasks {
        extractions.push(task.await??);
    }

    interrupt.abort();
    pb.finish_and_clear();

    Ok(extractions)
}

/// Stream one file from disk through the service.
fn extract_one(
    service: &DocumentIngestionService,
    path: PathBuf,
    signal: &CancellationSignal,
) -> Extraction {
    let filename = display_name(&path);

    let (bytes, result) = match File::open(&path) {
        Ok(file) => {
            let bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
            let request = IngestionRequest::new(filename, file);
            (bytes, service.ingest_with_cancel(request, signal))
        }
        Err(e) => (
            0,
            IngestionResult::failure(
                FailureKind::IoError,
                format!("Failed to open {}: {}", path.display(), e),
                Some(filename),
            ),
        ),
    };

    Extraction {
        path,
        bytes,
        result,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_json(extractions: &[Extraction]) -> Result<()> {
    let mut values = Vec::with_capacity(extractions.len());
    for extraction in extractions {
        let mut value = extraction.result.to_json()?;
        value["path"] = serde_json::json!(extraction.path.display().to_string());
        values.push(value);
    }

    let output = if values.len() == 1 {
        serde_json::to_string_pretty(&values[0])?
    } else {
        serde_json::to_string_pretty(&values)?
    };
    println!("{}", output);
    Ok(())
}

fn print_text(extractions: &[Extraction]) {
    // A single successful file prints bare text so it can be piped.
    if let [Extraction {
        result: IngestionResult::Success { text, .. },
        ..
    }] = extractions
    {
        println!("{}", text);
        return;
    }

    for extraction in extractions {
        match &extraction.result {
            IngestionResult::Success { text, filename } => {
                println!(
                    "{} {} ({}, {} chars)",
                    "==>".green().bold(),
                    filename,
                    format_size(extraction.bytes),
                    text.chars().count()
                );
                println!("{}", text);
                println!();
            }
            IngestionResult::Failure(failure) => {
                eprintln!(
                    "{} {}: {} [{}]",
                    "✗".red().bold(),
                    extraction.path.display(),
                    failure.message,
                    failure.kind
                );
            }
        }
    }
}
