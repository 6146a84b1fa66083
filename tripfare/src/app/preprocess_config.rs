use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tripfare_core::{clean::CleanBounds, split::SplitConfig, zone::ZoneIndexConfig};
use tripfare_store::{ingest::IngestConfig, IngestError};

use super::AppError;

pub const ENV_PREFIX: &str = "TRIPFARE";
pub const ENV_SEPARATOR: &str = "__";

/// configuration of a preprocessing run. every value has a default so an
/// empty configuration describes the standard processing container layout.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreprocessConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default = "default_host_descriptor_file")]
    pub host_descriptor_file: PathBuf,
    /// file name of the zone archive below `{base_dir}/input/zones`
    #[serde(default = "default_zones_archive")]
    pub zones_archive: String,
    #[serde(default)]
    pub zone: ZoneIndexConfig,
    #[serde(default)]
    pub clean: CleanBounds,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            host_descriptor_file: default_host_descriptor_file(),
            zones_archive: default_zones_archive(),
            zone: ZoneIndexConfig::default(),
            clean: CleanBounds::default(),
            split: SplitConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl PreprocessConfig {
    /// layers an optional configuration file and `TRIPFARE__*` environment
    /// variables (e.g. `TRIPFARE__INGEST__MAX_WORKERS=8`) over the defaults.
    pub fn load(config_file: Option<&Path>) -> Result<PreprocessConfig, AppError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                let source = config_file
                    .map(|p| format!("file '{}'", p.display()))
                    .unwrap_or_else(|| String::from("environment"));
                AppError::Configuration(format!("{source} produced error: {e}"))
            })?;
        config
            .try_deserialize::<PreprocessConfig>()
            .map_err(|e| AppError::Configuration(format!("error reading configuration: {e}")))
    }

    pub fn input_data_dir(&self) -> PathBuf {
        self.base_dir.join("input").join("data")
    }

    pub fn input_zones_dir(&self) -> PathBuf {
        self.base_dir.join("input").join("zones")
    }

    pub fn zones_archive_path(&self) -> PathBuf {
        self.input_zones_dir().join(&self.zones_archive)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.clean.validate()?;
        self.split.validate()?;
        self.ingest.validate()?;
        let has_endpoint = self
            .ingest
            .endpoint
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty());
        if let (Some(group), false) = (self.ingest.feature_group(), has_endpoint) {
            return Err(IngestError::InvalidConfiguration(format!(
                "feature group '{group}' is configured but no feature store endpoint was provided"
            ))
            .into());
        }
        self.zone.source_crs.validate().map_err(tripfare_core::PreprocessError::from)?;
        self.zone.projected_crs.validate().map_err(tripfare_core::PreprocessError::from)?;
        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("/opt/ml/processing")
}

fn default_host_descriptor_file() -> PathBuf {
    PathBuf::from("/opt/ml/config/resourceconfig.json")
}

fn default_zones_archive() -> String {
    String::from("taxi_zones.zip")
}
