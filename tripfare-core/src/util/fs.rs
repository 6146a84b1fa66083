use std::path::{Path, PathBuf};

use crate::PreprocessError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), PreprocessError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| PreprocessError::Write {
            path: dirspath.to_path_buf(),
            message: format!("error building output directory: {e}"),
        })
    } else {
        Ok(())
    }
}

/// lists files in `directory` with the given extension, sorted by path so
/// that concatenation order is stable between runs.
pub fn list_files_with_extension(
    directory: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, PreprocessError> {
    if !directory.is_dir() {
        return Ok(vec![]);
    }
    let entries = directory.read_dir().map_err(|e| PreprocessError::Read {
        path: directory.to_path_buf(),
        source: e,
    })?;
    let mut files = vec![];
    for entry in entries {
        let path = entry
            .map_err(|e| PreprocessError::Read {
                path: directory.to_path_buf(),
                source: e,
            })?
            .path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or_default();
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// depth-first search below `directory` for a file named `filename`.
pub fn find_file(directory: &Path, filename: &str) -> Result<Option<PathBuf>, PreprocessError> {
    let direct = directory.join(filename);
    if direct.is_file() {
        return Ok(Some(direct));
    }
    let entries = directory.read_dir().map_err(|e| PreprocessError::Read {
        path: directory.to_path_buf(),
        source: e,
    })?;
    let mut subdirectories = vec![];
    for entry in entries {
        let path = entry
            .map_err(|e| PreprocessError::Read {
                path: directory.to_path_buf(),
                source: e,
            })?
            .path();
        if path.is_dir() {
            subdirectories.push(path);
        }
    }
    subdirectories.sort();
    for subdirectory in subdirectories {
        if let Some(found) = find_file(&subdirectory, filename)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
