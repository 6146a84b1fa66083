use geo::Point;

use super::RawTripRecord;

/// a trip joined to the centroids of its pickup and dropoff zones, with the
/// derived geospatial and temporal features. any value that could not be
/// derived (missing zone, missing timestamp) is `None`; such rows are
/// removed during cleaning.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedTripRecord {
    pub trip: RawTripRecord,
    /// pickup zone centroid in the projected (metric) reference frame
    pub pickup_centroid: Option<Point<f64>>,
    /// dropoff zone centroid in the projected (metric) reference frame
    pub dropoff_centroid: Option<Point<f64>>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub dropoff_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
    /// distance between zone centroids in kilometers
    pub geo_distance_km: Option<f64>,
    pub hour: Option<u32>,
    /// day of week of pickup, 0 = Monday
    pub weekday: Option<u32>,
    /// month of pickup, 1 = January
    pub month: Option<u32>,
    /// dropoff minus pickup. negative when timestamps are inverted.
    pub duration_minutes: Option<f64>,
    /// run-local surrogate key, ordinal position plus a fixed offset
    pub fs_id: i64,
    /// run snapshot time in epoch seconds, shared by all records of a run
    pub fs_time: i64,
}
