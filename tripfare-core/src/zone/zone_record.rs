use geo::{MultiPolygon, Point};

use crate::model::ZoneId;

/// a taxi zone with its centroid expressed in both the projected (metric)
/// reference frame and geographic coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneRecord {
    pub zone_id: ZoneId,
    /// zone boundary in the source reference frame of the zone dataset
    pub geometry: MultiPolygon<f64>,
    /// centroid in the projected reference frame, in meters
    pub centroid_projected: Point<f64>,
    pub latitude: f64,
    pub longitude: f64,
}
