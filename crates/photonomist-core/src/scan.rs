use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, IoContext, Result};

/// Photos grouped by the folder they were found in.
pub type PhotoRoots = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Filename endings (lowercase) treated as photos.
const PHOTO_SUFFIXES: &[&str] = &["jpg", "jpeg", "nef", "cr2"];

pub fn is_photo_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    PHOTO_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Strip one pair of quotes a user may have pasted around a path.
pub fn clean_path(path: &str) -> &str {
    let path = path.trim();
    let path = path.strip_prefix(['"', '\'']).unwrap_or(path);
    path.strip_suffix(['"', '\'']).unwrap_or(path)
}

/// Recursively collect photos under `root`, grouped by parent folder.
///
/// Symbolic links to folders are not followed.
pub fn traverse_photos_path(root: &Path) -> Result<PhotoRoots> {
    let mut roots = PhotoRoots::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() || !is_photo_file(entry.path()) {
            continue;
        }
        let folder = entry.path().parent().unwrap_or(root).to_path_buf();
        roots.entry(folder).or_default().push(entry.into_path());
    }
    Ok(roots)
}

/// Drop every folder that is, or lies under, one of `excluded`.
pub fn exclude_paths(roots: &mut PhotoRoots, excluded: &[PathBuf]) {
    roots.retain(|folder, photos| {
        let keep = !excluded.iter().any(|ex| folder.starts_with(ex));
        if !keep {
            log::info!("Excluding {} photo(s) in {}", photos.len(), folder.display());
        }
        keep
    });
}

/// Check that `photos_path` exists, is not empty and holds at least one photo.
pub fn input_path_validation(photos_path: &Path) -> Result<PhotoRoots> {
    if !photos_path.exists() {
        return Err(Error::PathNotFound(photos_path.to_path_buf()));
    }
    if !photos_path.is_dir() {
        return Err(Error::NotADirectory(photos_path.to_path_buf()));
    }
    if fs::read_dir(photos_path).at(photos_path)?.next().is_none() {
        return Err(Error::EmptyDirectory(photos_path.to_path_buf()));
    }

    let roots = traverse_photos_path(photos_path)?;
    if roots.is_empty() {
        return Err(Error::NoPhotos(photos_path.to_path_buf()));
    }
    log::info!(
        "Found {} photo(s) in {} folder(s)",
        roots.values().map(Vec::len).sum::<usize>(),
        roots.len()
    );
    Ok(roots)
}

/// Check that the export root exists and is a directory.
pub fn export_path_validation(export_path: &Path) -> Result<()> {
    if !export_path.exists() {
        return Err(Error::PathNotFound(export_path.to_path_buf()));
    }
    if !export_path.is_dir() {
        return Err(Error::NotADirectory(export_path.to_path_buf()));
    }
    Ok(())
}

/// Total size in bytes of every discovered photo.
pub fn photos_size(roots: &PhotoRoots) -> Result<u64> {
    let mut total = 0;
    for photo in roots.values().flatten() {
        total += fs::metadata(photo).at(photo)?.len();
    }
    Ok(total)
}
