//! Error type shared by the parser, discovery, and runner layers.
//!
//! Rules and validators never produce these: a failed check is an issue,
//! not an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML frontmatter in {path}: {source}")]
    Frontmatter {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("frontmatter in {path} must be a key/value mapping")]
    FrontmatterShape { path: String },

    #[error("invalid plugin filter '{pattern}': {source}")]
    Filter {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
