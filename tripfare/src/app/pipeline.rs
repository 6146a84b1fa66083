use tripfare_core::{
    clean::{clean, CleanSummary},
    enrich::enrich,
    split::{split_and_write, OutputTag, Written},
    util::{fs::list_files_with_extension, trip_reader::load_trip_files},
    zone::ZoneIndex,
    PreprocessError,
};
use tripfare_store::ingest::{ingest_feature_rows, IngestionReport};

use super::{AppError, HostDescriptor, PreprocessConfig};

/// counts reported by a completed preprocessing run
#[derive(Clone, Debug)]
pub struct PreprocessSummary {
    pub host: String,
    pub zones_loaded: usize,
    pub trips_read: usize,
    pub pickup_lookup_misses: usize,
    pub dropoff_lookup_misses: usize,
    pub clean: CleanSummary,
    pub written: Written,
    /// None when no feature group is configured
    pub ingestion: Option<IngestionReport>,
}

/// runs zone loading, enrichment, cleaning, splitting and the optional
/// feature store ingestion against the layout below `config.base_dir`.
///
/// all inputs are checked before any transformation starts, so a missing
/// input never leaves partial output behind.
pub fn run_preprocess(config: &PreprocessConfig) -> Result<PreprocessSummary, AppError> {
    config.validate()?;

    let input_dir = config.input_data_dir();
    let trip_files = list_files_with_extension(&input_dir, "csv")?;
    log::info!("Input file list: {trip_files:?}");

    let host = HostDescriptor::read(&config.host_descriptor_file)?;

    if trip_files.is_empty() {
        return Err(PreprocessError::MissingInput(format!(
            "No input files found in {}",
            input_dir.display()
        ))
        .into());
    }
    let zones_file = config.zones_archive_path();
    if !zones_file.is_file() {
        return Err(PreprocessError::MissingInput(format!(
            "Zones file {} does not exist",
            zones_file.display()
        ))
        .into());
    }

    log::info!("Extracting zone file: {}", zones_file.display());
    let zones = ZoneIndex::load(&zones_file, &config.input_zones_dir(), &config.zone)?;

    let trips = load_trip_files(&trip_files)?;
    let enriched = enrich(&trips, &zones);
    let (dataset, clean_summary) = clean(&enriched.records, &config.clean);

    let tag = OutputTag::new(&host.current_host);
    let written = split_and_write(&dataset, &config.base_dir, &config.split, &tag)?;

    let ingestion = ingest_feature_rows(&dataset.feature_store, &config.ingest)?;

    Ok(PreprocessSummary {
        host: host.current_host,
        zones_loaded: zones.len(),
        trips_read: trips.len(),
        pickup_lookup_misses: enriched.pickup_lookup_misses,
        dropoff_lookup_misses: enriched.dropoff_lookup_misses,
        clean: clean_summary,
        written,
        ingestion,
    })
}
