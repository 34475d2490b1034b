use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::collision;
use crate::date::Grouping;
use crate::error::{Error, IoContext, Result};
use crate::ledger::NotTransferredLedger;
use crate::naming::folder_name;
use crate::photo::Photo;

/// Outcome of a single transfer.
#[derive(Debug)]
pub enum Transfer {
    /// Moved from `from` to `photo.path()`.
    Moved { from: PathBuf, photo: Photo },
    /// Already at its destination; nothing was touched.
    InPlace(Photo),
    /// No usable capture date; the path was appended to the ledger.
    NotTransferred(PathBuf),
}

/// Every directory under `dir` (including `dir`), without following links.
fn scan_existing_dirs(dir: &Path) -> HashSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect()
}

/// A folder name must be exactly one plain path component.
fn is_plain_folder_name(name: &str) -> bool {
    if name.contains(std::path::is_separator) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Moves photos into `<export_root>/<date>[_suffix]/` folders.
///
/// The export tree is walked once on construction; directories created
/// afterwards are tracked in the same set.
pub struct Relocator {
    export_root: PathBuf,
    grouping: Grouping,
    name_pattern: String,
    ledger: NotTransferredLedger,
    known_dirs: HashSet<PathBuf>,
}

impl Relocator {
    pub fn new(export_root: &Path, grouping: Grouping, name_pattern: impl Into<String>) -> Self {
        let known_dirs = scan_existing_dirs(export_root);
        Self {
            export_root: export_root.to_path_buf(),
            grouping,
            name_pattern: name_pattern.into(),
            ledger: NotTransferredLedger::new(export_root),
            known_dirs,
        }
    }

    /// Destination folder for a photo.
    ///
    /// `None` if it has no capture date, or if the date does not make a single
    /// folder name directly under the export root (empty, `..`, separators).
    pub fn destination_dir(&self, photo: &Photo) -> Option<PathBuf> {
        let token = photo.date_token(self.grouping)?;
        let name = folder_name(token.as_str(), &self.name_pattern);
        if !is_plain_folder_name(&name) {
            log::warn!(
                "Capture date of {} gives unusable folder name {:?}",
                photo.path().display(),
                name
            );
            return None;
        }
        Some(self.export_root.join(name))
    }

    pub fn transfer(&mut self, photo: Photo) -> Result<Transfer> {
        let Some(dir) = self.destination_dir(&photo) else {
            log::warn!("No usable capture date for {}, not transferred", photo.path().display());
            self.ledger.record(photo.path())?;
            return Ok(Transfer::NotTransferred(photo.path().to_path_buf()));
        };

        self.ensure_dir(&dir)?;

        let file_name = photo.path().file_name().ok_or_else(|| {
            Error::io(
                photo.path(),
                io::Error::new(io::ErrorKind::InvalidInput, "photo path has no file name"),
            )
        })?;
        let desired = dir.join(file_name);

        if is_same_file(photo.path(), &desired) {
            log::debug!("{} already in place", photo.path().display());
            return Ok(Transfer::InPlace(photo));
        }

        let dest = collision::resolve(&desired)?;
        move_file(photo.path(), &dest)?;
        self.known_dirs.insert(dir);
        log::info!("{} -> {}", photo.path().display(), dest.display());

        let from = photo.path().to_path_buf();
        Ok(Transfer::Moved {
            from,
            photo: photo.moved_to(dest),
        })
    }

    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        if self.known_dirs.contains(dir) {
            return Ok(());
        }
        if !dir.is_dir() {
            fs::create_dir_all(dir).at(dir)?;
            log::debug!("Created folder {}", dir.display());
        }
        self.known_dirs.insert(dir.to_path_buf());
        Ok(())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Move `from` to `to`. If the destination folder disappeared since it was
/// checked, recreate it and retry once.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound && from.exists() => {
            let Some(parent) = to.parent().filter(|p| !p.is_dir()) else {
                return Err(Error::io(from, e));
            };
            log::warn!("{} vanished, recreating it", parent.display());
            fs::create_dir_all(parent).at(parent)?;
            rename(from, to).at(from)
        }
        Err(e) => Err(Error::io(from, e)),
    }
}

/// `fs::rename`, falling back to copy + remove across filesystems.
fn rename(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("{} crosses devices, copying", to.display());
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        other => other,
    }
}
