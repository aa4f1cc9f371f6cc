//! Text extraction through an external command-line tool.

use crate::error::{ProcessError, ProcessResult};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A command that prints the text of the file passed as its last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    command: String,
    args: Vec<String>,
}

impl ExternalTool {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// The antiword converter for legacy Word documents.
    pub fn antiword() -> Self {
        Self::new("antiword", vec![])
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the command can be found on `PATH`.
    pub fn is_available(&self) -> bool {
        which::which(&self.command).is_ok()
    }
}

/// Run `tool` on `path` and return its stdout decoded as UTF-8.
pub fn extract_text(tool: &ExternalTool, path: &Path) -> ProcessResult<String> {
    if !path.exists() {
        return Err(ProcessError::FileNotFound(path.to_path_buf()));
    }

    if !tool.is_available() {
        return Err(ProcessError::ToolNotFound {
            tool: tool.command.clone(),
        });
    }

    debug!(tool = %tool.command, "Running external extractor on {:?}", path);

    let output = Command::new(&tool.command)
        .args(&tool.args)
        .arg(path)
        .output()?;

    if !output.status.success() {
        return match output.status.code() {
            Some(code) => Err(ProcessError::ProcessFailed {
                tool: tool.command.clone(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            None => Err(ProcessError::Terminated {
                tool: tool.command.clone(),
            }),
        };
    }

    if !output.stderr.is_empty() {
        // antiword reports recoverable oddities on stderr but still succeeds
        debug!("{} warning: {}", tool.command, String::from_utf8_lossy(&output.stderr));
    }

    String::from_utf8(output.stdout).map_err(|source| ProcessError::InvalidOutput {
        tool: tool.command.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extracts_stdout() {
        let cat = ExternalTool::new("cat", vec![]);
        if !cat.is_available() {
            return;
        }

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "legacy text\r\nsecond line").unwrap();

        let text = extract_text(&cat, file.path()).unwrap();
        assert_eq!(text, "legacy text\r\nsecond line");
    }

    #[test]
    fn test_invalid_utf8_output() {
        let cat = ExternalTool::new("cat", vec![]);
        if !cat.is_available() {
            return;
        }

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = extract_text(&cat, file.path()).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidOutput { .. }));
    }

    #[test]
    fn test_nonzero_exit() {
        let ls = ExternalTool::new("ls", vec!["--doctext-unknown-flag".to_string()]);
        if !ls.is_available() {
            return;
        }

        let file = NamedTempFile::new().unwrap();
        let err = extract_text(&ls, file.path()).unwrap_err();
        assert!(matches!(err, ProcessError::ProcessFailed { .. }));
    }

    #[test]
    fn test_missing_tool() {
        let tool = ExternalTool::new("doctext-no-such-tool", vec![]);
        let file = NamedTempFile::new().unwrap();

        let err = extract_text(&tool, file.path()).unwrap_err();
        assert!(matches!(err, ProcessError::ToolNotFound { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = extract_text(&ExternalTool::antiword(), Path::new("/nonexistent/file.doc"))
            .unwrap_err();
        assert!(matches!(err, ProcessError::FileNotFound(_)));
    }
}
