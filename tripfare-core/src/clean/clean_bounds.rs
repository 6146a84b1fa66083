use serde::{Deserialize, Serialize};

use crate::PreprocessError;

/// an exclusive range (min, max)
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct OpenRange {
    pub min: f64,
    pub max: f64,
}

impl OpenRange {
    pub const fn new(min: f64, max: f64) -> OpenRange {
        OpenRange { min, max }
    }

    /// strict containment. missing and NaN values are never contained.
    pub fn contains(&self, value: Option<f64>) -> bool {
        matches!(value, Some(v) if self.min < v && v < self.max)
    }
}

/// outlier thresholds applied by the cleaner. every bound is strict.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CleanBounds {
    #[serde(default = "default_fare_amount")]
    pub fare_amount: OpenRange,
    /// passenger count must exceed this value
    #[serde(default)]
    pub min_passenger_count: f64,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: OpenRange,
    #[serde(default = "default_geo_distance_km")]
    pub geo_distance_km: OpenRange,
}

impl Default for CleanBounds {
    fn default() -> Self {
        Self {
            fare_amount: default_fare_amount(),
            min_passenger_count: 0.0,
            duration_minutes: default_duration_minutes(),
            geo_distance_km: default_geo_distance_km(),
        }
    }
}

impl CleanBounds {
    pub fn validate(&self) -> Result<(), PreprocessError> {
        let ranges = [
            ("fare_amount", self.fare_amount),
            ("duration_minutes", self.duration_minutes),
            ("geo_distance_km", self.geo_distance_km),
        ];
        for (name, range) in ranges {
            if !(range.min < range.max) {
                return Err(PreprocessError::InvalidConfiguration(format!(
                    "clean bound {name} has min {} not below max {}",
                    range.min, range.max
                )));
            }
        }
        if !self.min_passenger_count.is_finite() {
            return Err(PreprocessError::InvalidConfiguration(String::from(
                "min_passenger_count must be finite",
            )));
        }
        Ok(())
    }
}

fn default_fare_amount() -> OpenRange {
    OpenRange::new(0.0, 200.0)
}

fn default_duration_minutes() -> OpenRange {
    OpenRange::new(0.0, 120.0)
}

fn default_geo_distance_km() -> OpenRange {
    OpenRange::new(0.0, 121.0)
}
