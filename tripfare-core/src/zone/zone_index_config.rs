use serde::{Deserialize, Serialize};

use crate::projection::Crs;

/// configures how the zone geometry dataset is read and projected.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ZoneIndexConfig {
    /// name of the shapefile inside the zone archive. searched for recursively
    /// below the extraction directory.
    #[serde(default = "default_shapefile_name")]
    pub shapefile_name: String,
    /// attribute column holding the zone identifier
    #[serde(default = "default_zone_id_column")]
    pub zone_id_column: String,
    /// reference frame of the shapefile geometries
    #[serde(default = "Crs::new_york_long_island")]
    pub source_crs: Crs,
    /// metric reference frame used for distance computation
    #[serde(default = "Crs::california_albers")]
    pub projected_crs: Crs,
}

impl Default for ZoneIndexConfig {
    fn default() -> Self {
        Self {
            shapefile_name: default_shapefile_name(),
            zone_id_column: default_zone_id_column(),
            source_crs: Crs::new_york_long_island(),
            projected_crs: Crs::california_albers(),
        }
    }
}

fn default_shapefile_name() -> String {
    "taxi_zones.shp".to_string()
}

fn default_zone_id_column() -> String {
    "LocationID".to_string()
}
