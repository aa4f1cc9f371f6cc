//! Document parsers for the supported upload formats.

pub(crate) mod doc;
pub(crate) mod docx;
pub(crate) mod pdf;

pub use doc::DocParser;
pub use docx::DocxParser;
pub use pdf::PdfParser;

use crate::error::IngestResult;
use std::path::Path;

/// Trait for format parsers.
///
/// Implementations hold no per-request state, so one shared instance can
/// serve concurrent ingestions.
pub trait FormatParser: Send + Sync {
    /// Extract the raw text of the file at `path`.
    fn parse(&self, path: &Path) -> IngestResult<String>;

    /// Short format name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Get the supported file extensions (lowercase, without the dot).
    fn extensions(&self) -> &[&str];

    /// Check if this parser supports the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
