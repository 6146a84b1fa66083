use crate::model::{CleanDataset, CleanFeatureStoreRow, EnrichedTripRecord};

use super::CleanBounds;

/// aggregate counts from a cleaning pass. rows are never reported
/// individually.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub input_rows: usize,
    pub retained_rows: usize,
    pub dropped_rows: usize,
}

/// removes outliers and rows with missing values, then projects the
/// surviving rows into the training and feature store column sets.
pub fn clean(rows: &[EnrichedTripRecord], bounds: &CleanBounds) -> (CleanDataset, CleanSummary) {
    let feature_store = rows
        .iter()
        .filter(|row| within_bounds(row, bounds))
        .filter_map(project)
        .collect::<Vec<_>>();
    let training = feature_store
        .iter()
        .map(CleanFeatureStoreRow::training_view)
        .collect::<Vec<_>>();

    let summary = CleanSummary {
        input_rows: rows.len(),
        retained_rows: feature_store.len(),
        dropped_rows: rows.len() - feature_store.len(),
    };
    log::info!(
        "cleaning retained {} of {} rows ({} dropped as invalid)",
        summary.retained_rows,
        summary.input_rows,
        summary.dropped_rows
    );
    let dataset = CleanDataset {
        training,
        feature_store,
    };
    (dataset, summary)
}

fn within_bounds(row: &EnrichedTripRecord, bounds: &CleanBounds) -> bool {
    bounds.fare_amount.contains(row.trip.fare_amount)
        && matches!(row.trip.passenger_count, Some(p) if p > bounds.min_passenger_count)
        && bounds.duration_minutes.contains(row.duration_minutes)
        && bounds.geo_distance_km.contains(row.geo_distance_km)
}

/// None if any retained column is missing
fn project(row: &EnrichedTripRecord) -> Option<CleanFeatureStoreRow> {
    Some(CleanFeatureStoreRow {
        fare_amount: row.trip.fare_amount?,
        passenger_count: row.trip.passenger_count?,
        pickup_latitude: row.pickup_latitude?,
        pickup_longitude: row.pickup_longitude?,
        dropoff_latitude: row.dropoff_latitude?,
        dropoff_longitude: row.dropoff_longitude?,
        geo_distance: row.geo_distance_km?,
        hour: row.hour?,
        weekday: row.weekday?,
        month: row.month?,
        fs_id: row.fs_id,
        fs_time: row.fs_time,
    })
}
