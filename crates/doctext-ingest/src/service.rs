//! The ingestion service: persist, parse, normalize, clean up.

use crate::cancel::CancellationSignal;
use crate::error::{IngestError, IngestResult};
use crate::normalize::normalize;
use crate::registry::ParserRegistry;
use crate::working_file::WorkingFile;
use doctext_config::{AppPaths, Config};
use doctext_core::{extension_of, sanitize_filename, FailureKind, IngestionResult};
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// An uploaded file awaiting extraction.
pub struct IngestionRequest {
    filename: String,
    content: Box<dyn Read + Send>,
}

impl IngestionRequest {
    /// A request whose content is streamed from `content`.
    pub fn new(filename: impl Into<String>, content: impl Read + Send + 'static) -> Self {
        Self {
            filename: filename.into(),
            content: Box::new(content),
        }
    }

    /// A request with in-memory content.
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(filename, Cursor::new(bytes.into()))
    }

    /// The filename as supplied by the client (untrusted).
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl std::fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Turns uploaded documents into normalized text.
///
/// Holds no per-request state; share it behind an `Arc` to serve concurrent
/// requests. All work is blocking, so async callers should run
/// [`ingest`](Self::ingest) on a blocking thread.
#[derive(Debug)]
pub struct DocumentIngestionService {
    working_dir: PathBuf,
    registry: ParserRegistry,
}

impl DocumentIngestionService {
    /// Create a service, creating `working_dir` if needed.
    pub fn new(working_dir: impl Into<PathBuf>, registry: ParserRegistry) -> IngestResult<Self> {
        let working_dir = working_dir.into();
        std::fs::create_dir_all(&working_dir)?;

        info!(
            working_dir = ?working_dir,
            formats = ?registry.extensions(),
            "Ingestion service ready"
        );

        Ok(Self {
            working_dir,
            registry,
        })
    }

    /// Create a service from loaded configuration.
    pub fn from_config(config: &Config, paths: &AppPaths) -> IngestResult<Self> {
        config.validate()?;
        Self::new(config.working_dir(paths), ParserRegistry::from_config(config))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Ingest a request that cannot be cancelled.
    pub fn ingest(&self, request: IngestionRequest) -> IngestionResult {
        self.ingest_with_cancel(request, &CancellationSignal::never())
    }

    /// Ingest a request. Never panics outward and never leaves the working
    /// file behind; every failure is reported in the returned result.
    pub fn ingest_with_cancel(
        &self,
        request: IngestionRequest,
        cancel: &CancellationSignal,
    ) -> IngestionResult {
        let IngestionRequest {
            filename: raw_filename,
            mut content,
        } = request;

        let filename = match sanitize_filename(&raw_filename) {
            Ok(name) => name,
            Err(e) => {
                warn!(filename = ?raw_filename, "Rejected upload: {}", e);
                return IngestionResult::failure(FailureKind::InvalidFilename, e.to_string(), None);
            }
        };

        match self.process(&filename, content.as_mut(), cancel) {
            Ok(text) => {
                info!(filename = %filename, chars = text.len(), "Extracted text");
                IngestionResult::success(text, filename)
            }
            Err(e) => {
                let kind = e.kind();
                match kind {
                    FailureKind::ParseError | FailureKind::IoError => {
                        error!(filename = %filename, kind = %kind, "Error processing file: {}", e)
                    }
                    _ => warn!(filename = %filename, kind = %kind, "Rejected upload: {}", e),
                }
                IngestionResult::failure(kind, e.to_string(), Some(filename))
            }
        }
    }

    fn process(
        &self,
        filename: &str,
        content: &mut dyn Read,
        cancel: &CancellationSignal,
    ) -> IngestResult<String> {
        if cancel.is_cancelled() {
            return Err(IngestError::Cancelled);
        }

        let working = WorkingFile::persist(&self.working_dir, filename, content)?;

        let outcome = self
            .extract(working.path(), filename, cancel)
            .map_err(|e| e.redact_path(working.path(), filename));

        let path = working.path().to_path_buf();
        if let Err(e) = working.cleanup() {
            warn!(working_file = ?path, error = %e, "Failed to remove working file");
        }

        outcome
    }

    fn extract(&self, path: &Path, filename: &str, cancel: &CancellationSignal) -> IngestResult<String> {
        if cancel.is_cancelled() {
            return Err(IngestError::Cancelled);
        }

        let extension = extension_of(filename).unwrap_or_default();
        let parser = self.registry.resolve(&extension)?;

        debug!(filename = %filename, parser = parser.name(), "Extracting text");

        let raw = panic::catch_unwind(AssertUnwindSafe(|| parser.parse(path)))
            .map_err(|_| IngestError::parse(parser.name(), "extractor panicked"))??;

        Ok(normalize(&raw))
    }
}
