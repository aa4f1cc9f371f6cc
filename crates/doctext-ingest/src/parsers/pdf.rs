//! PDF document parser.

use super::FormatParser;
use crate::error::{IngestError, IngestResult};
use doctext_core::SupportedFormat;
use lopdf::Document;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

const FORMAT: SupportedFormat = SupportedFormat::Pdf;

/// Parser for PDF files.
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    /// Load the document. The file handle is owned by the reader passed to
    /// lopdf and closed when loading returns, whether or not it succeeded.
    fn load(path: &Path) -> IngestResult<Document> {
        let file = File::open(path)?;
        Document::load_from(BufReader::new(file))
            .map_err(|e| IngestError::parse(FORMAT.as_str(), e))
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for PdfParser {
    fn parse(&self, path: &Path) -> IngestResult<String> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        debug!("Parsing PDF: {:?}", path);

        let document = Self::load(path)?;
        if document.is_encrypted() {
            return Err(IngestError::parse(FORMAT.as_str(), "document is encrypted"));
        }

        let pages = document.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = document.extract_text(&[*page_number]).map_err(|e| {
                IngestError::parse(FORMAT.as_str(), format!("page {}: {}", page_number, e))
            })?;
            texts.push(text);
        }

        debug!("Extracted {} pages from PDF", texts.len());

        Ok(texts.join("\n"))
    }

    fn name(&self) -> &'static str {
        FORMAT.as_str()
    }

    fn extensions(&self) -> &[&str] {
        FORMAT.extensions()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Build a PDF with one page per entry of `pages`.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_parse_pages_in_order() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(&build_pdf(&["First page", "Second page"])).unwrap();

        let text = PdfParser::new().parse(file.path()).unwrap();

        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_corrupt_pdf() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let err = PdfParser::new().parse(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Parse { format: "pdf", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = PdfParser::new().parse(Path::new("/nonexistent/a.pdf")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }

    #[test]
    fn test_pdf_parser_extensions() {
        let parser = PdfParser::new();
        assert!(parser.supports("pdf"));
        assert!(parser.supports("PDF"));
        assert!(!parser.supports("txt"));
    }
}
