pub mod collision;
pub mod date;
pub mod error;
pub mod ledger;
pub mod metadata;
pub mod naming;
pub mod photo;
pub mod relocate;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

pub use date::{DateToken, Grouping};
pub use error::{Error, Result};
pub use ledger::{NotTransferredLedger, LEDGER_FILENAME};
pub use naming::NamePattern;
pub use photo::Photo;
pub use relocate::{Relocator, Transfer};
pub use scan::PhotoRoots;

/// Settings shared by every photo of a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidyOptions {
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(default)]
    pub name_pattern: NamePattern,
}

/// Everything needed to organize one source tree into one export root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeOptions {
    pub photos_path: PathBuf,
    pub export_path: PathBuf,
    /// Source folders left untouched; their photos are skipped.
    #[serde(default)]
    pub exclude: Vec<PathBuf>,
    #[serde(flatten)]
    pub tidy: TidyOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidyReport {
    pub total: u64,
    pub moved: u64,
    pub in_place: u64,
    pub not_transferred: u64,
}

/// Type alias for progress callback: `(stage, current, total, message)`
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + 'a;

/// Throttled progress reporter: emits at most every 200ms, and always on the last item.
pub struct ThrottledProgress<'a> {
    inner: &'a ProgressCallback<'a>,
    last_emit: Cell<Instant>,
}

impl<'a> ThrottledProgress<'a> {
    pub fn new(inner: &'a ProgressCallback<'a>) -> Self {
        Self {
            inner,
            last_emit: Cell::new(Instant::now() - Duration::from_secs(1)),
        }
    }

    pub fn report(&self, stage: &str, current: u64, total: u64, message: &str) {
        let is_done = current + 1 >= total;
        if !is_done {
            if self.last_emit.get().elapsed().as_millis() < 200 {
                return;
            }
            self.last_emit.set(Instant::now());
        }
        (self.inner)(stage, current, total, message);
    }
}

/// Move every photo of `roots` into date folders under `export_path`.
///
/// Photos without a capture date are recorded in the ledger and the batch
/// goes on. Any other failure stops the batch and names the photo.
pub fn tidy_photos(
    export_path: &Path,
    roots: &PhotoRoots,
    options: &TidyOptions,
    progress_callback: &ProgressCallback<'_>,
) -> Result<TidyReport> {
    let tp = ThrottledProgress::new(progress_callback);
    let mut relocator = Relocator::new(
        export_path,
        options.grouping,
        options.name_pattern.to_string(),
    );

    let total = roots.values().map(Vec::len).sum::<usize>() as u64;
    let mut report = TidyReport {
        total,
        ..TidyReport::default()
    };

    for (current, path) in roots.values().flatten().enumerate() {
        let outcome = relocator
            .transfer(Photo::new(path))
            .map_err(|e| Error::Transfer {
                photo: path.clone(),
                source: Box::new(e),
            })?;
        match outcome {
            Transfer::Moved { .. } => report.moved += 1,
            Transfer::InPlace(_) => report.in_place += 1,
            Transfer::NotTransferred(_) => report.not_transferred += 1,
        }
        tp.report("tidy", current as u64, total, &path.to_string_lossy());
    }

    log::info!(
        "Moved {} photo(s), {} already in place, {} not transferred",
        report.moved,
        report.in_place,
        report.not_transferred
    );
    Ok(report)
}

/// Validate both paths, discover photos, drop excluded folders and tidy the rest.
pub fn organize(
    options: &OrganizeOptions,
    progress_callback: &ProgressCallback<'_>,
) -> Result<TidyReport> {
    let mut roots = scan::input_path_validation(&options.photos_path)?;
    scan::export_path_validation(&options.export_path)?;
    scan::exclude_paths(&mut roots, &options.exclude);
    tidy_photos(&options.export_path, &roots, &options.tidy, progress_callback)
}
