mod feature_record;
mod feature_store_error;
mod http_store;

pub use feature_record::{FeatureRecord, FeatureValue};
pub use feature_store_error::FeatureStoreError;
pub use http_store::HttpFeatureStore;

use futures::future::BoxFuture;

/// a remote table accepting one record per call. implementations must be
/// shareable across the ingestion worker threads.
pub trait FeatureStore: Send + Sync {
    fn put_record<'a>(
        &'a self,
        feature_group: &'a str,
        record: &'a FeatureRecord,
    ) -> BoxFuture<'a, Result<(), FeatureStoreError>>;
}
