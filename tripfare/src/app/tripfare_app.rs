use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use super::{run_preprocess, AppError, PreprocessConfig};

/// Command line tool for taxi fare feature engineering
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TripfareApp {
    #[command(subcommand)]
    pub op: TripfareOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TripfareOperation {
    /// enrich raw trips with zone centroids, remove outliers, write the
    /// train/validation/test splits and optionally ingest the feature table
    Preprocess {
        /// TOML configuration file. values not set here fall back to
        /// TRIPFARE__* environment variables and then to defaults.
        #[arg(short, long)]
        config_file: Option<String>,

        /// root of the processing container layout, containing input/data
        /// and input/zones. overrides the configuration file.
        #[arg(short, long)]
        base_dir: Option<String>,

        /// JSON file describing this host within the processing job
        #[arg(long)]
        host_descriptor_file: Option<String>,

        /// feature group to ingest the feature table into. ingestion is
        /// skipped when not set.
        #[arg(short, long)]
        feature_group_name: Option<String>,

        /// worker threads used for ingestion
        #[arg(long)]
        max_processes: Option<usize>,

        /// records in flight per ingestion worker
        #[arg(long)]
        max_workers: Option<usize>,
    },
}

impl TripfareOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            TripfareOperation::Preprocess {
                config_file,
                base_dir,
                host_descriptor_file,
                feature_group_name,
                max_processes,
                max_workers,
            } => {
                let mut config = PreprocessConfig::load(config_file.as_deref().map(Path::new))?;
                if let Some(dir) = base_dir {
                    config.base_dir = PathBuf::from(dir);
                }
                if let Some(file) = host_descriptor_file {
                    config.host_descriptor_file = PathBuf::from(file);
                }
                if let Some(name) = feature_group_name {
                    config.ingest.feature_group_name = Some(name.clone());
                }
                if let Some(n) = max_processes {
                    config.ingest.max_processes = *n;
                }
                if let Some(n) = max_workers {
                    config.ingest.max_workers = *n;
                }
                log::info!("Starting preprocessing.");
                let summary = run_preprocess(&config)?;
                log::info!(
                    "Done. {} of {} trips retained",
                    summary.clean.retained_rows,
                    summary.trips_read
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_preprocess_args() {
        let app = TripfareApp::try_parse_from([
            "tripfare",
            "preprocess",
            "--base-dir",
            "/tmp/processing",
            "--feature-group-name",
            "fares",
            "--max-workers",
            "2",
        ])
        .unwrap();
        match app.op {
            TripfareOperation::Preprocess {
                config_file,
                base_dir,
                feature_group_name,
                max_workers,
                max_processes,
                ..
            } => {
                assert_eq!(config_file, None);
                assert_eq!(base_dir.as_deref(), Some("/tmp/processing"));
                assert_eq!(feature_group_name.as_deref(), Some("fares"));
                assert_eq!(max_workers, Some(2));
                assert_eq!(max_processes, None);
            }
        }
    }
}
