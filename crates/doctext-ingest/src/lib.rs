//! Doctext Ingest - Upload ingestion and text extraction pipeline.
//!
//! This crate provides:
//! - Format parsers for PDF, DOCX and legacy DOC files
//! - A registry mapping file extensions to parsers
//! - Text normalization of extracted output
//! - The ingestion service, which persists an upload to a private working
//!   file, extracts its text and always removes the working file afterwards

mod cancel;
mod error;
mod normalize;
mod parsers;
mod registry;
mod service;
mod working_file;

pub use cancel::{cancellation, CancellationHandle, CancellationSignal};
pub use error::{IngestError, IngestResult};
pub use normalize::normalize;
pub use parsers::{DocParser, DocxParser, FormatParser, PdfParser};
pub use registry::ParserRegistry;
pub use service::{DocumentIngestionService, IngestionRequest};
