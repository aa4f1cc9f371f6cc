//! Core domain types for Doctext.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single ingestion request.
pub type RequestId = String;

/// Generate a new unique ID.
pub fn new_id() -> RequestId {
    Uuid::new_v4().simple().to_string()
}

/// Document formats with a built-in text extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    Pdf,
    Docx,
    Doc,
}

impl SupportedFormat {
    /// Every built-in format.
    pub const ALL: [SupportedFormat; 3] =
        [SupportedFormat::Pdf, SupportedFormat::Docx, SupportedFormat::Doc];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SupportedFormat::Pdf => "pdf",
            SupportedFormat::Docx => "docx",
            SupportedFormat::Doc => "doc",
        }
    }

    /// File extensions (lowercase, without the dot) handled as this format.
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            SupportedFormat::Pdf => &["pdf"],
            SupportedFormat::Docx => &["docx"],
            SupportedFormat::Doc => &["doc"],
        }
    }

    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SupportedFormat::Pdf),
            "docx" => Some(SupportedFormat::Docx),
            "doc" => Some(SupportedFormat::Doc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an ingestion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidFilename,
    UnsupportedFormat,
    ParseError,
    IoError,
    Cancelled,
}

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureClass {
    /// The request itself was bad (or withdrawn); resubmitting it unchanged won't help.
    Client,
    /// Extraction or the filesystem failed while handling a well-formed request.
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidFilename => "invalid_filename",
            FailureKind::UnsupportedFormat => "unsupported_format",
            FailureKind::ParseError => "parse_error",
            FailureKind::IoError => "io_error",
            FailureKind::Cancelled => "cancelled",
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            FailureKind::InvalidFilename
            | FailureKind::UnsupportedFormat
            | FailureKind::Cancelled => FailureClass::Client,
            FailureKind::ParseError | FailureKind::IoError => FailureClass::Internal,
        }
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self.class() {
            FailureClass::Client => 400,
            FailureClass::Internal => 500,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Details of a failed ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionFailure {
    pub kind: FailureKind,
    /// Human-readable message. Never contains working-directory paths.
    pub message: String,
    /// Sanitized filename, when sanitization got that far.
    pub filename: Option<String>,
}

/// Outcome of a single ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IngestionResult {
    Success {
        text: String,
        filename: String,
    },
    #[serde(rename = "error")]
    Failure(IngestionFailure),
}

impl IngestionResult {
    pub fn success(text: impl Into<String>, filename: impl Into<String>) -> Self {
        IngestionResult::Success {
            text: text.into(),
            filename: filename.into(),
        }
    }

    pub fn failure(
        kind: FailureKind,
        message: impl Into<String>,
        filename: Option<String>,
    ) -> Self {
        IngestionResult::Failure(IngestionFailure {
            kind,
            message: message.into(),
            filename,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, IngestionResult::Success { .. })
    }

    /// The failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            IngestionResult::Success { .. } => None,
            IngestionResult::Failure(f) => Some(f.kind),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            IngestionResult::Success { filename, .. } => Some(filename),
            IngestionResult::Failure(f) => f.filename.as_deref(),
        }
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            IngestionResult::Success { .. } => 200,
            IngestionResult::Failure(f) => f.kind.status_code(),
        }
    }

    /// Serialize to the `{status, text, filename}` / `{status, message, filename}` shape.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
