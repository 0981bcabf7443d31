use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

/// The one-line handoff file overlay tools read.
///
/// Writes are whole-file overwrites, so concurrent pollers race at
/// last-writer-wins granularity and no locking is needed. Failures are
/// logged and swallowed; a bad disk must never kill a poller.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: Arc<PathBuf>,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `content` plus a trailing newline.
    pub fn write(&self, content: &str) {
        match fs::write(self.path.as_ref(), format!("{content}\n")) {
            Ok(()) => debug!(content = %content, "Wrote output file"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to write output file")
            }
        }
    }
}
