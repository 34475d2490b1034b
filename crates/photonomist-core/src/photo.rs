use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::date::{self, DateToken, Grouping, Metadata};
use crate::metadata::{self, Tags};

/// A photo on disk. Tags, metadata and date are decoded on first use.
#[derive(Debug, Clone)]
pub struct Photo {
    /// Current location of the file
    path: PathBuf,
    tags: OnceCell<Tags>,
    metadata: OnceCell<Metadata>,
}

impl Photo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tags: OnceCell::new(),
            metadata: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw EXIF tags; empty when the file could not be decoded.
    pub fn tags(&self) -> &Tags {
        self.tags.get_or_init(|| metadata::extract_tags(&self.path))
    }

    /// Tags deduplicated by local name.
    pub fn metadata(&self) -> &Metadata {
        self.metadata.get_or_init(|| date::metadata_map(self.tags()))
    }

    /// Capture date as `YYYY:MM:DD`, or `None` when the photo has no `DateTimeOriginal`.
    pub fn date(&self) -> Option<String> {
        date::capture_date(self.metadata())
    }

    pub fn date_token(&self, grouping: Grouping) -> Option<DateToken> {
        self.date().map(|d| date::truncate(&d, grouping))
    }

    /// The same photo at a new location. Decoded metadata is carried over.
    pub fn moved_to(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..self
        }
    }
}
