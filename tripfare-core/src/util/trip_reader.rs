use std::{io::Read, path::Path, path::PathBuf};

use kdam::{tqdm, BarExt};

use crate::{model::RawTripRecord, PreprocessError};

/// reads and concatenates trip files in the order given. only the
/// feature engineering columns are kept, other columns are ignored.
pub fn load_trip_files(files: &[PathBuf]) -> Result<Vec<RawTripRecord>, PreprocessError> {
    if files.is_empty() {
        return Err(PreprocessError::MissingInput(String::from(
            "no trip files provided",
        )));
    }
    let mut trips = vec![];
    let mut bar = tqdm!(total = files.len(), desc = "read trip files");
    for file in files {
        let reader = std::fs::File::open(file).map_err(|e| PreprocessError::Read {
            path: file.clone(),
            source: e,
        })?;
        let rows = read_trips(reader, file)?;
        log::debug!("read {} trips from {}", rows.len(), file.display());
        trips.extend(rows);
        let _ = bar.update(1);
    }
    eprintln!();
    log::info!("read {} trips from {} files", trips.len(), files.len());
    Ok(trips)
}

/// deserializes trip rows from a headed CSV source. `source` is used for
/// error reporting only.
pub fn read_trips<R: Read>(reader: R, source: &Path) -> Result<Vec<RawTripRecord>, PreprocessError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<RawTripRecord>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| PreprocessError::Parse {
                path: source.to_path_buf(),
                message: format!("failure reading trip row {idx}: {e}"),
            })
        })
        .collect()
}
