use serde::{Deserialize, Serialize};

/// model input features. column order is the order of the written split
/// files, with the fare label first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CleanTrainingRow {
    pub fare_amount: f64,
    pub passenger_count: f64,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub dropoff_latitude: f64,
    pub dropoff_longitude: f64,
    pub geo_distance: f64,
    pub hour: u32,
    pub weekday: u32,
    pub month: u32,
}

/// model input features plus the synthetic identifier and snapshot time
/// required by the feature store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CleanFeatureStoreRow {
    pub fare_amount: f64,
    pub passenger_count: f64,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub dropoff_latitude: f64,
    pub dropoff_longitude: f64,
    pub geo_distance: f64,
    pub hour: u32,
    pub weekday: u32,
    pub month: u32,
    #[serde(rename = "FS_ID")]
    pub fs_id: i64,
    #[serde(rename = "FS_time")]
    pub fs_time: i64,
}

impl CleanFeatureStoreRow {
    pub fn training_view(&self) -> CleanTrainingRow {
        CleanTrainingRow {
            fare_amount: self.fare_amount,
            passenger_count: self.passenger_count,
            pickup_latitude: self.pickup_latitude,
            pickup_longitude: self.pickup_longitude,
            dropoff_latitude: self.dropoff_latitude,
            dropoff_longitude: self.dropoff_longitude,
            geo_distance: self.geo_distance,
            hour: self.hour,
            weekday: self.weekday,
            month: self.month,
        }
    }
}

/// the two column projections of one cleaned row set. both vectors have the
/// same length and the same relative order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CleanDataset {
    pub training: Vec<CleanTrainingRow>,
    pub feature_store: Vec<CleanFeatureStoreRow>,
}

impl CleanDataset {
    pub fn len(&self) -> usize {
        self.training.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training.is_empty()
    }
}
