use serde::{Deserialize, Serialize};

/// identifier of a taxi zone. trips reference zones through their
/// pickup and dropoff location ids, the zone table through `LocationID`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub i64);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ZoneId {
    fn from(value: i64) -> Self {
        ZoneId(value)
    }
}
