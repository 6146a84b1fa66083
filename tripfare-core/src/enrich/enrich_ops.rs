use chrono::{Datelike, Timelike};
use geo::{Distance, Euclidean, Point};

use crate::{
    model::{EnrichedTripRecord, RawTripRecord, ZoneId},
    zone::{ZoneIndex, ZoneRecord},
};

/// added to the ordinal position of each trip to build its feature store id
pub const FS_ID_OFFSET: i64 = 1000;

/// result of enriching a batch of trips, along with counts of zone ids
/// that could not be found in the zone index.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedTrips {
    pub records: Vec<EnrichedTripRecord>,
    pub pickup_lookup_misses: usize,
    pub dropoff_lookup_misses: usize,
    /// snapshot time applied to every record
    pub fs_time: i64,
}

/// enriches trips using the current wall-clock time as the feature store
/// snapshot time.
pub fn enrich(trips: &[RawTripRecord], zones: &ZoneIndex) -> EnrichedTrips {
    enrich_at(trips, zones, chrono::Utc::now().timestamp())
}

/// joins each trip to its pickup and dropoff zones and derives the
/// geospatial and temporal features. unmatched zone ids do not remove the
/// trip, they leave the matching side's features empty.
pub fn enrich_at(trips: &[RawTripRecord], zones: &ZoneIndex, fs_time: i64) -> EnrichedTrips {
    let mut pickup_lookup_misses = 0;
    let mut dropoff_lookup_misses = 0;
    let records = trips
        .iter()
        .enumerate()
        .map(|(idx, trip)| {
            let pickup = lookup(zones, trip.pickup_zone_id.as_ref());
            let dropoff = lookup(zones, trip.dropoff_zone_id.as_ref());
            if pickup.is_none() {
                pickup_lookup_misses += 1;
            }
            if dropoff.is_none() {
                dropoff_lookup_misses += 1;
            }
            enrich_trip(trip, pickup, dropoff, idx, fs_time)
        })
        .collect::<Vec<_>>();

    if pickup_lookup_misses > 0 || dropoff_lookup_misses > 0 {
        log::warn!(
            "{pickup_lookup_misses} pickup and {dropoff_lookup_misses} dropoff zone ids not found in zone index"
        );
    }
    log::info!("enriched {} trips", records.len());
    EnrichedTrips {
        records,
        pickup_lookup_misses,
        dropoff_lookup_misses,
        fs_time,
    }
}

fn lookup<'a>(zones: &'a ZoneIndex, zone_id: Option<&ZoneId>) -> Option<&'a ZoneRecord> {
    zone_id.and_then(|id| zones.get(id))
}

fn enrich_trip(
    trip: &RawTripRecord,
    pickup: Option<&ZoneRecord>,
    dropoff: Option<&ZoneRecord>,
    idx: usize,
    fs_time: i64,
) -> EnrichedTripRecord {
    let pickup_centroid = pickup.map(|z| z.centroid_projected);
    let dropoff_centroid = dropoff.map(|z| z.centroid_projected);
    let geo_distance_km = match (pickup_centroid, dropoff_centroid) {
        (Some(p), Some(d)) => Some(projected_distance_km(p, d)),
        _ => None,
    };
    let duration_minutes = match (trip.pickup_datetime, trip.dropoff_datetime) {
        (Some(p), Some(d)) => Some((d - p).num_seconds() as f64 / 60.0),
        _ => None,
    };
    EnrichedTripRecord {
        trip: trip.clone(),
        pickup_centroid,
        dropoff_centroid,
        pickup_latitude: pickup.map(|z| z.latitude),
        pickup_longitude: pickup.map(|z| z.longitude),
        dropoff_latitude: dropoff.map(|z| z.latitude),
        dropoff_longitude: dropoff.map(|z| z.longitude),
        geo_distance_km,
        hour: trip.pickup_datetime.map(|t| t.hour()),
        weekday: trip
            .pickup_datetime
            .map(|t| t.weekday().num_days_from_monday()),
        month: trip.pickup_datetime.map(|t| t.month()),
        duration_minutes,
        fs_id: idx as i64 + FS_ID_OFFSET,
        fs_time,
    }
}

/// planar distance between two projected points, meters to kilometers
fn projected_distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    Euclidean.distance(a, b) / 1000.0
}
