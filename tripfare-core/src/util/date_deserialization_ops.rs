use chrono::NaiveDateTime;
use serde::de::Error;
use serde::Deserialize;
use serde::Deserializer;

pub const APP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn naive_datetime_from_str(datetime_str: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(datetime_str, APP_DATETIME_FORMAT)
}

/// reads an optional datetime. empty cells are null, anything else must
/// match [`APP_DATETIME_FORMAT`].
pub fn deserialize_optional_naive_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let datetime_str: Option<String> = Option::deserialize(deserializer)?;
    match datetime_str.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => naive_datetime_from_str(s)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("Invalid datetime format '{s}': {e}"))),
    }
}
