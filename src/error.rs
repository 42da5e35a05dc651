//! Error type shared by the collection, export and graph stages.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("failed to walk results tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Raised only when presence checks are enabled.
    #[error("trial {trial} is missing {file}")]
    MissingLog { trial: String, file: &'static str },

    #[error("column '{0}' not found in {1}")]
    MissingColumn(String, PathBuf),

    #[error("plotting failed: {0}")]
    Plot(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
