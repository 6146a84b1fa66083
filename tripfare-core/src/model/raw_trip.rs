use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ZoneId;
use crate::util::date_deserialization_ops::deserialize_optional_naive_datetime;

/// a single taxi trip as read from an input file. only the columns used
/// for feature engineering are retained; every value may be missing.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RawTripRecord {
    pub fare_amount: Option<f64>,
    #[serde(
        rename = "lpep_pickup_datetime",
        alias = "tpep_pickup_datetime",
        alias = "pickup_datetime",
        default,
        deserialize_with = "deserialize_optional_naive_datetime"
    )]
    pub pickup_datetime: Option<NaiveDateTime>,
    #[serde(
        rename = "lpep_dropoff_datetime",
        alias = "tpep_dropoff_datetime",
        alias = "dropoff_datetime",
        default,
        deserialize_with = "deserialize_optional_naive_datetime"
    )]
    pub dropoff_datetime: Option<NaiveDateTime>,
    pub passenger_count: Option<f64>,
    #[serde(rename = "PULocationID", alias = "pulocationid")]
    pub pickup_zone_id: Option<ZoneId>,
    #[serde(rename = "DOLocationID", alias = "dolocationid")]
    pub dropoff_zone_id: Option<ZoneId>,
}
