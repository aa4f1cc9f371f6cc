//! Doctext Process - External text extractors.
//!
//! Legacy binary formats are handed to command-line tools (antiword by
//! default). These rely on the tools being installed on the system.

mod error;
mod extract;

pub use error::{ProcessError, ProcessResult};
pub use extract::{extract_text, ExternalTool};

/// Check whether each of the given tools is on `PATH`.
pub fn check_dependencies<'a>(tools: &[&'a str]) -> Vec<(&'a str, bool)> {
    tools
        .iter()
        .map(|tool| (*tool, which::which(tool).is_ok()))
        .collect()
}

/// Check if all of the given tools are installed.
pub fn all_tools_available(tools: &[&str]) -> bool {
    check_dependencies(tools).iter().all(|(_, available)| *available)
}
