//! DOCX document parser.

use super::FormatParser;
use crate::error::{IngestError, IngestResult};
use doctext_core::SupportedFormat;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::path::Path;
use tracing::debug;

const FORMAT: SupportedFormat = SupportedFormat::Docx;

/// Parser for Office Open XML word documents.
///
/// Only top-level body paragraphs are read; tables and section content are
/// skipped.
pub struct DocxParser;

impl DocxParser {
    /// Create a new DOCX parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for DocxParser {
    fn parse(&self, path: &Path) -> IngestResult<String> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        debug!("Parsing DOCX: {:?}", path);

        let data = std::fs::read(path)?;
        let docx =
            docx_rs::read_docx(&data).map_err(|e| IngestError::parse(FORMAT.as_str(), e))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        debug!("Extracted {} paragraphs from DOCX", paragraphs.len());

        Ok(paragraphs.join("\n"))
    }

    fn name(&self) -> &'static str {
        FORMAT.as_str()
    }

    fn extensions(&self) -> &[&str] {
        FORMAT.extensions()
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    collect_text(&paragraph.children, &mut text);
    text
}

fn collect_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            // Link text lives in runs nested under the hyperlink
            ParagraphChild::Hyperlink(link) => collect_text(&link.children, out),
            _ => {}
        }
    }
}
