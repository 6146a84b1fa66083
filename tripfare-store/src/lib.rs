pub mod feature_store;
pub mod ingest;

mod error;

pub use error::IngestError;
