use serde::{Deserialize, Serialize};
use tripfare_core::model::CleanFeatureStoreRow;

/// one named value of a record. every value travels as a string, the store
/// coerces it using the feature group's feature definitions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureValue {
    #[serde(rename = "FeatureName")]
    pub feature_name: String,
    #[serde(rename = "ValueAsString")]
    pub value_as_string: String,
}

impl FeatureValue {
    pub fn new<T: ToString>(feature_name: &str, value: T) -> FeatureValue {
        FeatureValue {
            feature_name: feature_name.to_string(),
            value_as_string: value.to_string(),
        }
    }
}

/// ordered list of feature values making up one feature store record
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct FeatureRecord(pub Vec<FeatureValue>);

impl FeatureRecord {
    pub fn get(&self, feature_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.feature_name == feature_name)
            .map(|v| v.value_as_string.as_str())
    }
}

impl From<&CleanFeatureStoreRow> for FeatureRecord {
    fn from(row: &CleanFeatureStoreRow) -> Self {
        FeatureRecord(vec![
            FeatureValue::new("fare_amount", row.fare_amount),
            FeatureValue::new("passenger_count", row.passenger_count),
            FeatureValue::new("pickup_latitude", row.pickup_latitude),
            FeatureValue::new("pickup_longitude", row.pickup_longitude),
            FeatureValue::new("dropoff_latitude", row.dropoff_latitude),
            FeatureValue::new("dropoff_longitude", row.dropoff_longitude),
            FeatureValue::new("geo_distance", row.geo_distance),
            FeatureValue::new("hour", row.hour),
            FeatureValue::new("weekday", row.weekday),
            FeatureValue::new("month", row.month),
            FeatureValue::new("FS_ID", row.fs_id),
            FeatureValue::new("FS_time", row.fs_time),
        ])
    }
}
