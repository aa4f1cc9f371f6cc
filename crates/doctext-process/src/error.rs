//! Error types for external tool invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that can occur while running an external extractor.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Tool not found: {tool}. Please install it.")]
    ToolNotFound { tool: String },

    #[error("{tool} failed with exit code {code}: {stderr}")]
    ProcessFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("{tool} was terminated by a signal")]
    Terminated { tool: String },

    #[error("{tool} produced output that is not valid UTF-8: {source}")]
    InvalidOutput {
        tool: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
