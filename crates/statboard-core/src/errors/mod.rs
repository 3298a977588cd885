pub mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn an input file into a [`crate::table::Table`].
///
/// Any of these means no metric is computed for the request.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty (no header row)", path.display())]
    Empty { path: PathBuf },

    #[error("failed to parse {} at record {record}: {message}", path.display())]
    Parse {
        path: PathBuf,
        record: usize,
        message: String,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Empty { path } | LoadError::Parse { path, .. } => {
                path
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(pub String);
