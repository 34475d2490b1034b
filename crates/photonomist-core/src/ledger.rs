use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{IoContext, Result};

/// Ledger filename inside the export root
pub const LEDGER_FILENAME: &str = "not_transferred.txt";

/// Append-only list of photos that had no capture date, one path per line.
#[derive(Debug, Clone)]
pub struct NotTransferredLedger {
    path: PathBuf,
}

impl NotTransferredLedger {
    pub fn new(export_root: &Path) -> Self {
        Self {
            path: export_root.join(LEDGER_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `photo_path` as one line, creating the file if needed.
    pub fn record(&self, photo_path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .at(&self.path)?;
        writeln!(file, "{}", photo_path.display()).at(&self.path)?;
        Ok(())
    }
}
