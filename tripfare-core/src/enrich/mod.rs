mod enrich_ops;

pub use enrich_ops::{enrich, enrich_at, EnrichedTrips, FS_ID_OFFSET};
