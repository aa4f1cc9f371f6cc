//! Extension-keyed parser lookup.

use crate::error::{IngestError, IngestResult};
use crate::parsers::{DocParser, DocxParser, FormatParser, PdfParser};
use doctext_config::Config;
use doctext_core::SupportedFormat;
use doctext_process::ExternalTool;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maps lowercase file extensions to the parser that handles them.
///
/// Built once and never mutated afterwards; new formats are added by
/// registering another [`FormatParser`].
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn FormatParser>>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser for every [`SupportedFormat`].
    pub fn standard(doc_tool: ExternalTool) -> Self {
        SupportedFormat::ALL
            .iter()
            .fold(Self::new(), |registry, format| match format {
                SupportedFormat::Pdf => registry.register(PdfParser::new()),
                SupportedFormat::Docx => registry.register(DocxParser::new()),
                SupportedFormat::Doc => registry.register(DocParser::new(doc_tool.clone())),
            })
    }

    /// Standard parsers, limited to the configured allowed extensions.
    pub fn from_config(config: &Config) -> Self {
        let tool = ExternalTool::new(
            config.extractors.doc_command.clone(),
            config.extractors.doc_args.clone(),
        );
        Self::standard(tool).restrict_to(&config.ingest.allowed_extensions)
    }

    /// Add a parser for every extension it supports.
    pub fn register(mut self, parser: impl FormatParser + 'static) -> Self {
        let parser: Arc<dyn FormatParser> = Arc::new(parser);
        for ext in parser.extensions() {
            self.parsers.insert(ext.to_lowercase(), Arc::clone(&parser));
        }
        self
    }

    /// Drop every extension not in `allowed`.
    pub fn restrict_to(mut self, allowed: &[String]) -> Self {
        self.parsers
            .retain(|ext, _| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)));
        self
    }

    /// Find the parser for an extension (case-insensitive, no leading dot).
    pub fn resolve(&self, extension: &str) -> IngestResult<&dyn FormatParser> {
        let ext = extension.to_lowercase();
        match self.parsers.get(&ext) {
            Some(parser) => {
                debug!(extension = %ext, parser = parser.name(), "Resolved parser");
                Ok(&**parser)
            }
            None if ext.is_empty() => Err(IngestError::UnsupportedFormat(
                "file has no extension".to_string(),
            )),
            None => Err(IngestError::UnsupportedFormat(ext)),
        }
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct MarkdownParser;

    impl FormatParser for MarkdownParser {
        fn parse(&self, path: &Path) -> IngestResult<String> {
            Ok(std::fs::read_to_string(path)?)
        }

        fn name(&self) -> &'static str {
            "markdown"
        }

        fn extensions(&self) -> &[&str] {
            &["md", "markdown"]
        }
    }

    #[test]
    fn test_standard_registry() {
        let registry = ParserRegistry::standard(ExternalTool::antiword());

        assert_eq!(registry.extensions(), vec!["doc", "docx", "pdf"]);
        assert_eq!(registry.resolve("pdf").unwrap().name(), "pdf");
        assert_eq!(registry.resolve("DOCX").unwrap().name(), "docx");
        assert_eq!(registry.resolve("Doc").unwrap().name(), "doc");
    }

    #[test]
    fn test_standard_covers_every_format() {
        let registry = ParserRegistry::standard(ExternalTool::antiword());

        for format in SupportedFormat::ALL {
            for ext in format.extensions() {
                let parser = registry.resolve(ext).unwrap();
                assert_eq!(parser.name(), format.as_str());
                assert_eq!(SupportedFormat::from_extension(ext), Some(format));
            }
        }
    }

    #[test]
    fn test_unknown_extension() {
        let registry = ParserRegistry::standard(ExternalTool::antiword());

        for ext in ["txt", "exe", "pdfx", ""] {
            assert!(matches!(
                registry.resolve(ext),
                Err(IngestError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_restrict_to_allowed() {
        let registry = ParserRegistry::standard(ExternalTool::antiword())
            .restrict_to(&["pdf".to_string()]);

        assert!(registry.resolve("pdf").is_ok());
        assert!(registry.resolve("docx").is_err());
        assert!(registry.resolve("doc").is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.ingest.allowed_extensions = vec!["docx".to_string(), "doc".to_string()];

        let registry = ParserRegistry::from_config(&config);
        assert_eq!(registry.extensions(), vec!["doc", "docx"]);
    }

    #[test]
    fn test_register_additional_parser() {
        let registry = ParserRegistry::standard(ExternalTool::antiword()).register(MarkdownParser);

        assert_eq!(registry.resolve("md").unwrap().name(), "markdown");
        assert_eq!(registry.resolve("markdown").unwrap().name(), "markdown");
        assert_eq!(registry.resolve("pdf").unwrap().name(), "pdf");
    }
}
