use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A photo failed to transfer; aborts the remaining batch.
    #[error("Could not transfer {}: {source}", photo.display())]
    Transfer {
        photo: PathBuf,
        #[source]
        source: Box<Error>,
    },
    #[error("No free name for {} after {attempts} attempts", path.display())]
    CollisionLimit { path: PathBuf, attempts: u32 },
    #[error("Grouping by year and by month at the same time is not supported")]
    InvalidGrouping,
    #[error("The provided path was not found: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("The provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("The provided path does not contain any files: {}", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("No .jpg, .jpeg, .nef or .cr2 files found under {}", .0.display())]
    NoPhotos(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Attach a path to a bare `io::Result`.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
