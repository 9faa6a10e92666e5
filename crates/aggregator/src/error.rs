use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AggregateError>;

/// Pass-level failure: the whole aggregation is abandoned and no payload is produced.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Invalid aggregation root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Invalid application namespace: {0:?}")]
    InvalidNamespace(String),

    #[error("Suffix must be non-empty")]
    EmptySuffix,

    #[error("Failed to serialize aggregate: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-fragment failure. Always recovered locally: the fragment is skipped and the pass continues.
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Failed to read fragment {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON fragment {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FragmentError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
