use std::path::PathBuf;

use tripfare_core::PreprocessError;
use tripfare_store::IngestError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("host descriptor '{path}' is malformed: {message}")]
    HostDescriptor { path: PathBuf, message: String },
}
