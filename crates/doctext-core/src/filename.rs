//! Filename handling for untrusted upload names.

use crate::error::{Error, Result};

/// Longest sanitized filename accepted, in bytes. Leaves room for the
/// request-id prefix within a 255-byte path segment.
const MAX_FILENAME_BYTES: usize = 200;

/// Reduce an untrusted filename to a single safe path segment.
///
/// Directory components (either separator style) are stripped, surrounding
/// whitespace is trimmed, and names that are empty, `.`/`..`, overlong or
/// contain control characters are rejected.
pub fn sanitize_filename(raw: &str) -> Result<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let name = last.trim();

    if name.chars().any(char::is_control) {
        return Err(Error::InvalidFilename(
            "filename contains control characters".to_string(),
        ));
    }

    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidFilename(
            "filename is empty after sanitization".to_string(),
        ));
    }

    if name.len() > MAX_FILENAME_BYTES {
        return Err(Error::InvalidFilename(format!(
            "filename exceeds {} bytes",
            MAX_FILENAME_BYTES
        )));
    }

    Ok(name.to_string())
}

/// The lower-cased text after the last `.`, or `None` when there is no dot.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}
