//! Legacy Word (.doc) parser backed by an external tool.

use super::FormatParser;
use crate::error::{IngestError, IngestResult};
use doctext_core::SupportedFormat;
use doctext_process::{ExternalTool, ProcessError};
use std::path::Path;
use tracing::debug;

const FORMAT: SupportedFormat = SupportedFormat::Doc;

/// Parser for legacy binary Word documents.
///
/// The format is delegated to an external converter (antiword by default)
/// whose stdout is taken as the document text.
pub struct DocParser {
    tool: ExternalTool,
}

impl DocParser {
    /// Create a parser that runs the given tool.
    pub fn new(tool: ExternalTool) -> Self {
        Self { tool }
    }

    /// The configured extraction tool.
    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }
}

impl Default for DocParser {
    fn default() -> Self {
        Self::new(ExternalTool::antiword())
    }
}

impl FormatParser for DocParser {
    fn parse(&self, path: &Path) -> IngestResult<String> {
        debug!(tool = self.tool.command(), "Parsing DOC: {:?}", path);

        doctext_process::extract_text(&self.tool, path).map_err(|e| match e {
            ProcessError::FileNotFound(path) => IngestError::FileNotFound(path),
            other => IngestError::parse(FORMAT.as_str(), other),
        })
    }

    fn name(&self) -> &'static str {
        FORMAT.as_str()
    }

    fn extensions(&self) -> &[&str] {
        FORMAT.extensions()
    }
}
