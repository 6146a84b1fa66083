use std::{
    fs::File,
    path::{Component, Path, PathBuf},
};

use crate::PreprocessError;

/// lexically resolves an archive entry name against a destination directory.
/// returns `None` when the entry is absolute or climbs out of the destination.
pub fn resolve_entry_path(destination: &Path, entry_name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    let mut depth: usize = 0;
    // backslash separators are treated as separators on every platform
    let normalized = entry_name.replace('\\', "/");
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => {
                relative.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                relative.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(destination.join(relative))
}

/// extracts a zip archive into `destination`. every entry is validated before
/// anything is written, so an archive containing a single unsafe entry leaves
/// the destination untouched.
///
/// # Returns
///
/// the paths of the extracted files
pub fn safe_extract(archive_path: &Path, destination: &Path) -> Result<Vec<PathBuf>, PreprocessError> {
    log::info!(
        "extracting '{}' into '{}'",
        archive_path.display(),
        destination.display()
    );
    let file = File::open(archive_path).map_err(|e| PreprocessError::Read {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| PreprocessError::Archive {
        path: archive_path.to_path_buf(),
        message: e.to_string(),
    })?;

    // validation pass
    let mut targets: Vec<(usize, PathBuf, bool)> = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(|e| PreprocessError::Archive {
            path: archive_path.to_path_buf(),
            message: format!("failure reading entry {i}: {e}"),
        })?;
        let name = entry.name().to_string();
        let target = resolve_entry_path(destination, &name).ok_or_else(|| {
            PreprocessError::UnsafeArchiveEntry {
                entry: name.clone(),
                destination: destination.to_path_buf(),
            }
        })?;
        targets.push((i, target, entry.is_dir()));
    }

    // write pass
    let mut extracted = Vec::with_capacity(targets.len());
    for (i, target, is_dir) in targets {
        if is_dir {
            crate::util::fs::create_dirs(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            crate::util::fs::create_dirs(parent)?;
        }
        let mut entry = archive.by_index(i).map_err(|e| PreprocessError::Archive {
            path: archive_path.to_path_buf(),
            message: format!("failure reading entry {i}: {e}"),
        })?;
        let mut out = File::create(&target).map_err(|e| PreprocessError::Write {
            path: target.clone(),
            message: e.to_string(),
        })?;
        std::io::copy(&mut entry, &mut out).map_err(|e| PreprocessError::Write {
            path: target.clone(),
            message: e.to_string(),
        })?;
        extracted.push(target);
    }
    log::info!("extracted {} files", extracted.len());
    Ok(extracted)
}
