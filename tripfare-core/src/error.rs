use std::path::PathBuf;

use crate::projection::ProjectionError;

#[derive(thiserror::Error, Debug)]
pub enum PreprocessError {
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("archive entry '{entry}' would be written outside of '{destination}'")]
    UnsafeArchiveEntry { entry: String, destination: PathBuf },
    #[error("failure reading archive '{path}': {message}")]
    Archive { path: PathBuf, message: String },
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error writing to '{path}': {message}")]
    Write { path: PathBuf, message: String },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to deserialize column {col} in file '{path}' due to: {message}")]
    Deserialize {
        col: String,
        path: PathBuf,
        message: String,
    },
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("{0}")]
    Internal(String),
}
