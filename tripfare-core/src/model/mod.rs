mod clean_row;
mod enriched_trip;
mod raw_trip;
mod zone_id;

pub use clean_row::{CleanDataset, CleanFeatureStoreRow, CleanTrainingRow};
pub use enriched_trip::EnrichedTripRecord;
pub use raw_trip::RawTripRecord;
pub use zone_id::ZoneId;
