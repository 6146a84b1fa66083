use std::path::{Path, PathBuf};

use itertools::Itertools;
use rayon::prelude::*;

use super::{assign_splits, OutputTag, SplitConfig, SplitLabel};
use crate::{
    model::{CleanDataset, CleanTrainingRow},
    util::fs::create_dirs,
    PreprocessError,
};

/// row counts and file locations of a completed split write
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Written {
    pub train_count: usize,
    pub val_count: usize,
    pub test_count: usize,
    pub train_path: PathBuf,
    pub validation_path: PathBuf,
    pub test_path: PathBuf,
}

/// splits the training view of a cleaned dataset and writes one headerless
/// CSV per split into `destination/{train,validation,test}/`.
///
/// files are first written to hidden temporary names and only moved into
/// place after all three writes succeed. on failure, the temporaries are
/// removed and nothing is committed.
pub fn split_and_write(
    dataset: &CleanDataset,
    destination: &Path,
    config: &SplitConfig,
    tag: &OutputTag,
) -> Result<Written, PreprocessError> {
    config.validate()?;
    if dataset.training.len() != dataset.feature_store.len() {
        return Err(PreprocessError::Internal(format!(
            "training view has {} rows but feature store view has {}",
            dataset.training.len(),
            dataset.feature_store.len()
        )));
    }
    log::info!(
        "Splitting {} rows of data into train, val, test.",
        dataset.len()
    );
    let assignment = assign_splits(dataset.len(), config);
    let plan = [
        (SplitLabel::Train, &assignment.train),
        (SplitLabel::Validation, &assignment.validation),
        (SplitLabel::Test, &assignment.test),
    ];

    log::info!("Writing out datasets to {}", destination.display());
    let results = plan
        .par_iter()
        .map(|(label, indices)| {
            let directory = destination.join(label.name());
            create_dirs(&directory)?;
            let final_path = directory.join(tag.filename(*label));
            if final_path.exists() {
                return Err(PreprocessError::Write {
                    path: final_path,
                    message: String::from("refusing to overwrite existing split file"),
                });
            }
            let temp_path = directory.join(format!(".{}.tmp", tag.filename(*label)));
            let rows = indices.iter().map(|idx| &dataset.training[*idx]);
            match write_rows(rows, &temp_path) {
                Ok(()) => Ok((temp_path, final_path)),
                Err(e) => {
                    let _ = std::fs::remove_file(&temp_path);
                    Err(e)
                }
            }
        })
        .collect::<Vec<_>>();

    let (staged, errors): (Vec<_>, Vec<_>) = results.into_iter().partition_result();
    if let Some(error) = errors.into_iter().next() {
        discard(&staged);
        return Err(error);
    }
    commit(&staged)?;

    let path_of = |label: SplitLabel| destination.join(label.name()).join(tag.filename(label));
    let written = Written {
        train_count: assignment.train.len(),
        val_count: assignment.validation.len(),
        test_count: assignment.test.len(),
        train_path: path_of(SplitLabel::Train),
        validation_path: path_of(SplitLabel::Validation),
        test_path: path_of(SplitLabel::Test),
    };
    log::info!(
        "wrote {} train, {} validation, {} test rows",
        written.train_count,
        written.val_count,
        written.test_count
    );
    Ok(written)
}

fn write_rows<'a, I>(rows: I, path: &Path) -> Result<(), PreprocessError>
where
    I: Iterator<Item = &'a CleanTrainingRow>,
{
    let write_error = |message: String| PreprocessError::Write {
        path: path.to_path_buf(),
        message,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(format!("failure opening output file: {e}")))?;
    for (idx, row) in rows.enumerate() {
        writer
            .serialize(row)
            .map_err(|e| write_error(format!("failure writing CSV output row {idx}: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| write_error(format!("failure flushing output file: {e}")))
}

/// moves every staged temporary onto its final path. if any move fails, the
/// files already moved are removed along with the remaining temporaries.
fn commit(staged: &[(PathBuf, PathBuf)]) -> Result<(), PreprocessError> {
    for (idx, (temp_path, final_path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(temp_path, final_path) {
            discard(&staged[idx..]);
            for (_, committed) in &staged[..idx] {
                if let Err(e) = std::fs::remove_file(committed) {
                    log::warn!("unable to remove '{}': {e}", committed.display());
                }
            }
            return Err(PreprocessError::Write {
                path: final_path.clone(),
                message: format!("failure committing split file: {e}"),
            });
        }
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in staged {
        if let Err(e) = std::fs::remove_file(temp_path) {
            log::warn!("unable to remove '{}': {e}", temp_path.display());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::CleanFeatureStoreRow;

    fn dataset(n: usize) -> CleanDataset {
        let feature_store = (0..n)
            .map(|i| CleanFeatureStoreRow {
                fare_amount: 5.0 + i as f64,
                passenger_count: 1.0,
                pickup_latitude: 40.7,
                pickup_longitude: -74.0,
                dropoff_latitude: 40.8,
                dropoff_longitude: -73.9,
                geo_distance: 2.5,
                hour: 7,
                weekday: 3,
                month: 6,
                fs_id: 1000 + i as i64,
                fs_time: 1,
            })
            .collect::<Vec<_>>();
        let training = feature_store
            .iter()
            .map(CleanFeatureStoreRow::training_view)
            .collect();
        CleanDataset {
            training,
            feature_store,
        }
    }

    fn read_fares(path: &Path) -> Vec<String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_writes_headerless_split_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = dataset(100);
        let tag = OutputTag::new("algo-1");
        let written = split_and_write(&data, dir.path(), &SplitConfig::default(), &tag).unwrap();

        assert_eq!(written.train_count, 80);
        assert_eq!(written.val_count, 19);
        assert_eq!(written.test_count, 1);
        assert_eq!(
            written.train_path,
            dir.path().join("train").join(tag.filename(SplitLabel::Train))
        );

        let train = std::fs::read_to_string(&written.train_path).unwrap();
        assert_eq!(train.lines().count(), 80);
        assert!(!train.contains("fare_amount"));
        let first = train.lines().next().unwrap();
        assert_eq!(first.split(',').count(), 10);

        // no temporaries left behind
        for label in SplitLabel::ALL {
            let entries = std::fs::read_dir(dir.path().join(label.name()))
                .unwrap()
                .count();
            assert_eq!(entries, 1);
        }
    }

    #[test]
    fn test_rerun_is_reproducible_with_new_names() {
        let dir = tempfile::tempdir().unwrap();
        let data = dataset(60);
        let config = SplitConfig::default();
        let first = split_and_write(&data, dir.path(), &config, &OutputTag::new("algo-1")).unwrap();
        let second = split_and_write(&data, dir.path(), &config, &OutputTag::new("algo-1")).unwrap();

        assert_ne!(first.train_path, second.train_path);
        assert_eq!(read_fares(&first.train_path), read_fares(&second.train_path));
        assert_eq!(read_fares(&first.test_path), read_fares(&second.test_path));
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let tag = OutputTag::new("algo-1");
        let test_dir = dir.path().join("test");
        create_dirs(&test_dir).unwrap();
        std::fs::write(test_dir.join(tag.filename(SplitLabel::Test)), "keep").unwrap();

        let result = split_and_write(&dataset(20), dir.path(), &SplitConfig::default(), &tag);

        assert!(matches!(result, Err(PreprocessError::Write { .. })));
        assert_eq!(
            std::fs::read_to_string(test_dir.join(tag.filename(SplitLabel::Test))).unwrap(),
            "keep"
        );
        // the other splits are not committed either
        let train_dir = dir.path().join("train");
        assert_eq!(std::fs::read_dir(train_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_commit_removes_committed_files() {
        let dir = tempfile::tempdir().unwrap();
        let train_temp = dir.path().join(".train.csv.tmp");
        let train_final = dir.path().join("train.csv");
        let test_temp = dir.path().join(".test.csv.tmp");
        let test_final = dir.path().join("test.csv");
        std::fs::write(&train_temp, "1,2\n").unwrap();
        std::fs::write(&test_temp, "3,4\n").unwrap();
        // the validation temporary was never written, so its move fails
        let staged = vec![
            (train_temp.clone(), train_final.clone()),
            (dir.path().join(".validation.csv.tmp"), dir.path().join("validation.csv")),
            (test_temp.clone(), test_final.clone()),
        ];

        let result = commit(&staged);

        assert!(matches!(result, Err(PreprocessError::Write { .. })));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(!train_final.exists());
        assert!(!test_temp.exists());
    }

    #[test]
    fn test_invalid_fraction() {
        let dir = tempfile::tempdir().unwrap();
        let config = SplitConfig {
            val_fraction: 1.5,
            ..SplitConfig::default()
        };
        let result = split_and_write(&dataset(5), dir.path(), &config, &OutputTag::new("w"));
        assert!(matches!(
            result,
            Err(PreprocessError::InvalidConfiguration(_))
        ));
    }
}
