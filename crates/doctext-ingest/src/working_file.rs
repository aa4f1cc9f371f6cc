//! Request-scoped working files.

use doctext_core::new_id;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An upload persisted to the working directory.
///
/// The file is removed by [`WorkingFile::cleanup`] or, failing that, when
/// the guard is dropped (early return, panic). Removal failures are logged.
#[derive(Debug)]
pub struct WorkingFile {
    path: PathBuf,
    removed: bool,
}

impl WorkingFile {
    /// Stream `content` into a fresh file named `<request id>-<filename>`
    /// inside `dir`. The file never pre-exists; a partial write is removed.
    pub fn persist(dir: &Path, filename: &str, content: &mut dyn Read) -> io::Result<Self> {
        let path = dir.join(format!("{}-{}", new_id(), filename));
        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let guard = Self {
            path,
            removed: false,
        };

        let mut writer = BufWriter::new(file);
        let bytes = io::copy(content, &mut writer)?;
        writer.flush()?;

        debug!("Persisted {} bytes to {:?}", bytes, guard.path);
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now. A file that is already gone counts as removed.
    pub fn cleanup(mut self) -> io::Result<()> {
        self.removed = true;
        remove(&self.path)
    }
}

impl Drop for WorkingFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = remove(&self.path) {
            warn!(working_file = ?self.path, error = %e, "Failed to remove working file");
        }
    }
}

fn remove(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed working file {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
