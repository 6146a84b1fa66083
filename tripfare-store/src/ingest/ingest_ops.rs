use std::sync::Arc;

use tripfare_core::model::CleanFeatureStoreRow;

use super::{IngestConfig, IngestionReport, Ingestor};
use crate::{feature_store::HttpFeatureStore, IngestError};

/// ingests the feature store view into the configured HTTP feature store and
/// verifies that every row was stored. returns None when no feature group is
/// configured.
pub fn ingest_feature_rows(
    rows: &[CleanFeatureStoreRow],
    config: &IngestConfig,
) -> Result<Option<IngestionReport>, IngestError> {
    let Some(feature_group) = config.feature_group() else {
        log::info!("no feature group configured, skipping feature store ingestion");
        return Ok(None);
    };
    config.validate()?;
    let store = Arc::new(HttpFeatureStore::try_from(config)?);
    let ingestor = Ingestor::new(store, feature_group, config.max_processes, config.max_workers)?;
    let report = ingestor.ingest(rows)?;
    report.ensure_complete()?;
    Ok(Some(report))
}
