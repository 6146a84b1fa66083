use serde::{Deserialize, Serialize};

use crate::IngestError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IngestConfig {
    /// target feature group. ingestion is skipped when absent or blank.
    #[serde(default)]
    pub feature_group_name: Option<String>,
    /// number of runtime worker threads and of row shards
    #[serde(default = "default_max_processes")]
    pub max_processes: usize,
    /// records in flight per shard
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            feature_group_name: None,
            max_processes: default_max_processes(),
            max_workers: default_max_workers(),
            endpoint: None,
            region: None,
            auth_token: None,
        }
    }
}

impl IngestConfig {
    /// the configured feature group, if ingestion is enabled
    pub fn feature_group(&self) -> Option<&str> {
        self.feature_group_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_processes == 0 {
            return Err(IngestError::InvalidConfiguration(String::from(
                "max_processes must be at least 1",
            )));
        }
        if self.max_workers == 0 {
            return Err(IngestError::InvalidConfiguration(String::from(
                "max_workers must be at least 1",
            )));
        }
        Ok(())
    }
}

fn default_max_processes() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_max_workers() -> usize {
    4
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feature_group_enabled() {
        let mut config = IngestConfig::default();
        assert_eq!(config.feature_group(), None);
        config.feature_group_name = Some(String::from("   "));
        assert_eq!(config.feature_group(), None);
        config.feature_group_name = Some(String::from("nyc-taxi-fares"));
        assert_eq!(config.feature_group(), Some("nyc-taxi-fares"));
    }

    #[test]
    fn test_defaults_from_json() {
        let config: IngestConfig = serde_json::from_str(r#"{"max_workers": 8}"#).unwrap();
        assert_eq!(config.max_workers, 8);
        assert!(config.max_processes >= 1);
        assert!(config.validate().is_ok());

        let config = IngestConfig {
            max_workers: 0,
            ..IngestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(IngestError::InvalidConfiguration(_))
        ));
    }
}
