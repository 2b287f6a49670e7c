use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to fingerprint a single file.
///
/// The scan never propagates these; they are logged and the file is
/// left out of every group.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HashError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root is missing or not a directory. Checked once, before any work.
    #[error("invalid scan root {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: &'static str },

    /// Cancellation was requested between two files.
    #[error("scan interrupted after {completed} of {total} files")]
    Interrupted { completed: usize, total: usize },
}
