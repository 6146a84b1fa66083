mod archive;
mod zone_index;
mod zone_index_config;
mod zone_record;

pub use archive::{resolve_entry_path, safe_extract};
pub use zone_index::ZoneIndex;
pub use zone_index_config::ZoneIndexConfig;
pub use zone_record::ZoneRecord;
