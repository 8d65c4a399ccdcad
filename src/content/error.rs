//! Per-file content errors

use std::path::PathBuf;
use thiserror::Error;

/// Why a single content file could not be turned into a post
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("front-matter block is not closed with `---`")]
    UnclosedFrontMatter,

    #[error("invalid front-matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

impl ContentError {
    /// Malformed files are skipped; I/O failures are not.
    /// A file that is not valid UTF-8 counts as malformed.
    pub fn is_malformed(&self) -> bool {
        match self {
            ContentError::Io { source, .. } => source.kind() == std::io::ErrorKind::InvalidData,
            _ => true,
        }
    }
}
