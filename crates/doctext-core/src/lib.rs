//! Doctext Core - Core types and domain models for document text extraction.

mod error;
mod filename;
mod types;

pub use error::{Error, Result};
pub use filename::{extension_of, sanitize_filename};
pub use types::*;
