//! Errors produced while generating subsets

use std::path::PathBuf;

use skera::SubsetError;
use thiserror::Error;
use write_fonts::{read::ReadError, BuilderError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading font data: {0}")]
    Read(#[from] ReadError),

    #[error("Subsetting failed: {0}")]
    Subset(#[from] SubsetError),

    #[error("Font assembly failed: {0}")]
    Build(#[from] BuilderError),

    #[error("Invalid subset configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid subset definition: {0}")]
    InvalidDefinition(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
