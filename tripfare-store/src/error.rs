#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("ingestion incomplete: {failed} of {total} rows were not stored")]
    IngestionIncomplete { failed: usize, total: usize },
    #[error("failure creating async rust tokio runtime: {0}")]
    Runtime(String),
    #[error("invalid ingestion configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failure building feature store client: {0}")]
    Client(String),
}
