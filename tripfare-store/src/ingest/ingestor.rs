use std::sync::{Arc, Mutex};

use futures::{
    future,
    stream::{self, StreamExt},
};
use itertools::Itertools;
use kdam::{Bar, BarExt};
use tripfare_core::model::CleanFeatureStoreRow;

use super::{IngestConfig, IngestionReport};
use crate::{
    feature_store::{FeatureRecord, FeatureStore},
    IngestError,
};

/// submits feature rows to a [`FeatureStore`] one record per call.
///
/// rows are split into `max_processes` contiguous shards that run on a
/// multi-threaded runtime with as many worker threads. within a shard at most
/// `max_workers` records are in flight. `ingest` returns only after every
/// shard has finished; failed rows are reported and never retried.
pub struct Ingestor {
    store: Arc<dyn FeatureStore>,
    feature_group: String,
    max_processes: usize,
    max_workers: usize,
}

impl Ingestor {
    pub fn new(
        store: Arc<dyn FeatureStore>,
        feature_group: &str,
        max_processes: usize,
        max_workers: usize,
    ) -> Result<Ingestor, IngestError> {
        if feature_group.trim().is_empty() {
            return Err(IngestError::InvalidConfiguration(String::from(
                "feature group name is empty",
            )));
        }
        if max_processes == 0 || max_workers == 0 {
            return Err(IngestError::InvalidConfiguration(format!(
                "max_processes and max_workers must be at least 1, found {max_processes} and {max_workers}"
            )));
        }
        Ok(Ingestor {
            store,
            feature_group: feature_group.trim().to_string(),
            max_processes,
            max_workers,
        })
    }

    /// builds an ingestor for the configured feature group, or None when
    /// ingestion is disabled.
    pub fn from_config(
        store: Arc<dyn FeatureStore>,
        config: &IngestConfig,
    ) -> Result<Option<Ingestor>, IngestError> {
        config.validate()?;
        match config.feature_group() {
            None => Ok(None),
            Some(name) => {
                Ingestor::new(store, name, config.max_processes, config.max_workers).map(Some)
            }
        }
    }

    pub fn feature_group(&self) -> &str {
        &self.feature_group
    }

    pub fn ingest(&self, rows: &[CleanFeatureStoreRow]) -> Result<IngestionReport, IngestError> {
        let total = rows.len();
        log::info!(
            "ingesting {total} rows into feature group '{}' with {} processes and {} workers",
            self.feature_group,
            self.max_processes,
            self.max_workers
        );
        if total == 0 {
            return Ok(IngestionReport::default());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.max_processes)
            .enable_all()
            .build()
            .map_err(|e| IngestError::Runtime(e.to_string()))?;

        let bar = Bar::builder()
            .total(total)
            .desc(format!("ingest {}", self.feature_group))
            .build()
            .map_err(IngestError::Runtime)?;
        let bar = Arc::new(Mutex::new(bar));

        let shard_size = total.div_ceil(self.max_processes);
        let shards = rows
            .iter()
            .map(FeatureRecord::from)
            .enumerate()
            .chunks(shard_size)
            .into_iter()
            .map(|chunk| chunk.collect_vec())
            .collect_vec();

        let joined = runtime.block_on(async {
            let handles = shards
                .into_iter()
                .map(|shard| {
                    tokio::spawn(ingest_shard(
                        self.store.clone(),
                        self.feature_group.clone(),
                        shard,
                        self.max_workers,
                        bar.clone(),
                    ))
                })
                .collect_vec();
            future::join_all(handles).await
        });
        eprintln!();

        let mut failed_rows = vec![];
        for result in joined {
            let shard_failures = result
                .map_err(|e| IngestError::Runtime(format!("ingestion shard failed: {e}")))?;
            failed_rows.extend(shard_failures);
        }
        failed_rows.sort_unstable();

        if failed_rows.is_empty() {
            log::info!("ingested all {total} rows");
        } else {
            log::warn!(
                "{} of {total} rows failed ingestion into '{}'",
                failed_rows.len(),
                self.feature_group
            );
        }
        Ok(IngestionReport { total, failed_rows })
    }
}

/// submits one shard, returning the indices of rows that failed
async fn ingest_shard(
    store: Arc<dyn FeatureStore>,
    feature_group: String,
    shard: Vec<(usize, FeatureRecord)>,
    max_workers: usize,
    bar: Arc<Mutex<Bar>>,
) -> Vec<usize> {
    let store = &store;
    let feature_group = feature_group.as_str();
    stream::iter(shard)
        .map(|(idx, record)| async move {
            let result = store.put_record(feature_group, &record).await;
            (idx, result)
        })
        .buffer_unordered(max_workers)
        .filter_map(|(idx, result)| {
            if let Ok(mut b) = bar.lock() {
                let _ = b.update(1);
            }
            let failed = match result {
                Ok(()) => None,
                Err(e) => {
                    log::debug!("row {idx} failed: {e}");
                    Some(idx)
                }
            };
            future::ready(failed)
        })
        .collect()
        .await
}
