//! Error types for the ingestion pipeline.

use doctext_core::FailureKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur during ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] doctext_config::ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Ingestion cancelled")]
    Cancelled,
}

impl IngestError {
    /// Build a parse error from any extraction failure.
    pub fn parse(format: &'static str, cause: impl std::fmt::Display) -> Self {
        IngestError::Parse {
            format,
            message: cause.to_string(),
        }
    }

    /// Classify this error for the caller.
    pub fn kind(&self) -> FailureKind {
        match self {
            IngestError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            IngestError::Parse { .. } => FailureKind::ParseError,
            IngestError::Cancelled => FailureKind::Cancelled,
            IngestError::Io(_) | IngestError::Config(_) | IngestError::FileNotFound(_) => {
                FailureKind::IoError
            }
        }
    }

    /// Replace mentions of an internal path with a caller-facing name.
    pub(crate) fn redact_path(self, path: &Path, replacement: &str) -> Self {
        let needle = path.to_string_lossy();
        match self {
            IngestError::Parse { format, message } => IngestError::Parse {
                format,
                message: message.replace(needle.as_ref(), replacement),
            },
            IngestError::FileNotFound(_) => IngestError::FileNotFound(PathBuf::from(replacement)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(IngestError::parse("pdf", "bad xref").kind(), FailureKind::ParseError);
        assert_eq!(IngestError::Cancelled.kind(), FailureKind::Cancelled);
        assert_eq!(
            IngestError::UnsupportedFormat("exe".into()).kind(),
            FailureKind::UnsupportedFormat
        );
        assert_eq!(
            IngestError::from(std::io::Error::other("disk full")).kind(),
            FailureKind::IoError
        );
    }

    #[test]
    fn test_redact_path() {
        let path = Path::new("/var/cache/doctext/0123-report.doc");
        let err = IngestError::parse("doc", format!("{} is not a Word Document.", path.display()))
            .redact_path(path, "report.doc");

        assert_eq!(
            err.to_string(),
            "Failed to extract text from doc: report.doc is not a Word Document."
        );
    }
}
