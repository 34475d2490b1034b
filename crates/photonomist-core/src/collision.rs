use std::ffi::{OsStr, OsString};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Upper bound on `(n)` candidates tried before giving up on a destination.
pub const MAX_COLLISION_ATTEMPTS: u32 = 10_000;

static PAREN_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([1-9][0-9]*\)").unwrap());

/// Byte spans of every `(<n>)` group in `s`, with `n` a positive integer.
pub fn find_parentheses_numbers(s: &str) -> Vec<Range<usize>> {
    PAREN_NUMBER_RE.find_iter(s).map(|m| m.range()).collect()
}

/// `stem` + `(counter)` + `extension`, where `extension` keeps its leading dot.
pub fn construct_new_photo_path(stem: &Path, counter: u32, extension: &OsStr) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(format!("({})", counter));
    name.push(extension);
    PathBuf::from(name)
}

/// Return `desired` if it is free, otherwise the first free `stem(n).ext`.
///
/// A trailing `(n)` already on the stem is dropped before numbering, so a
/// colliding `photo(1).jpg` becomes `photo(2).jpg` rather than `photo(1)(1).jpg`.
pub fn resolve(desired: &Path) -> Result<PathBuf> {
    if !desired.exists() {
        return Ok(desired.to_path_buf());
    }

    let (stem, extension) = split_stem(desired);
    for counter in 1..=MAX_COLLISION_ATTEMPTS {
        let candidate = construct_new_photo_path(&stem, counter, &extension);
        if !candidate.exists() {
            log::debug!(
                "{} exists, using {}",
                desired.display(),
                candidate.display()
            );
            return Ok(candidate);
        }
    }

    Err(Error::CollisionLimit {
        path: desired.to_path_buf(),
        attempts: MAX_COLLISION_ATTEMPTS,
    })
}

/// Split into (path without extension and without a trailing `(n)`, `.ext`).
fn split_stem(path: &Path) -> (PathBuf, OsString) {
    let extension = match path.extension() {
        Some(ext) => {
            let mut dotted = OsString::from(".");
            dotted.push(ext);
            dotted
        }
        None => OsString::new(),
    };

    let bare = path.with_extension("");
    let Some(name) = bare.file_name().and_then(|n| n.to_str()) else {
        return (bare, extension);
    };
    match find_parentheses_numbers(name).last() {
        Some(span) if span.start > 0 && span.end == name.len() => {
            (bare.with_file_name(&name[..span.start]), extension)
        }
        _ => (bare, extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_construct_new_photo_path() {
        assert_eq!(
            construct_new_photo_path(Path::new("a/random/photo"), 2, OsStr::new(".jpg")),
            PathBuf::from("a/random/photo(2).jpg")
        );
        assert_eq!(
            construct_new_photo_path(Path::new("a/random/photo"), 7, OsStr::new("")),
            PathBuf::from("a/random/photo(7)")
        );
    }

    #[test]
    fn test_find_parentheses_numbers() {
        let s = "random_string_with(5)_number_parentheses_in_the_middle";
        let spans = find_parentheses_numbers(s);
        assert_eq!(spans.len(), 1);
        assert_eq!(&s[spans[0].clone()], "(5)");

        assert!(find_parentheses_numbers("random_string_without_numbers").is_empty());
        assert!(find_parentheses_numbers("random_string_with(one)").is_empty());
        assert!(find_parentheses_numbers("leading_zero(0)").is_empty());
        assert_eq!(find_parentheses_numbers("a(1)b(23)").len(), 2);
    }

    #[test]
    fn test_resolve_free_path_is_unchanged() {
        let dir = tempdir().unwrap();
        let desired = dir.path().join("photo.jpg");
        assert_eq!(resolve(&desired).unwrap(), desired);
    }

    #[test]
    fn test_resolve_numbers_collisions() {
        let dir = tempdir().unwrap();
        let desired = dir.path().join("photo.jpg");
        fs::write(&desired, b"1").unwrap();
        assert_eq!(resolve(&desired).unwrap(), dir.path().join("photo(1).jpg"));

        fs::write(dir.path().join("photo(1).jpg"), b"2").unwrap();
        assert_eq!(resolve(&desired).unwrap(), dir.path().join("photo(2).jpg"));
    }

    #[test]
    fn test_resolve_does_not_chain_suffixes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("photo(1).jpg"), b"1").unwrap();

        let desired = dir.path().join("photo(1).jpg");
        assert_eq!(resolve(&desired).unwrap(), dir.path().join("photo(2).jpg"));
    }

    #[test]
    fn test_resolve_keeps_inner_parentheses() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("trip(3)_edit.jpg"), b"1").unwrap();

        let desired = dir.path().join("trip(3)_edit.jpg");
        assert_eq!(
            resolve(&desired).unwrap(),
            dir.path().join("trip(3)_edit(1).jpg")
        );
    }

    #[test]
    fn test_resolve_without_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("photo"), b"1").unwrap();
        assert_eq!(
            resolve(&dir.path().join("photo")).unwrap(),
            dir.path().join("photo(1)")
        );
    }
}
