mod ingest_config;
mod ingest_ops;
mod ingestion_report;
mod ingestor;

pub use ingest_config::IngestConfig;
pub use ingest_ops::ingest_feature_rows;
pub use ingestion_report::IngestionReport;
pub use ingestor::Ingestor;
