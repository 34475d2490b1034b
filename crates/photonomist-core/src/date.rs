use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::Tags;

/// Tag that carries the capture time.
pub const CAPTURE_DATE_TAG: &str = "DateTimeOriginal";

/// Deduplicated metadata keyed by the local tag name, e.g. `DateTimeOriginal`.
pub type Metadata = HashMap<String, String>;

/// Folder granularity for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Day,
    Month,
    Year,
}

impl Grouping {
    /// Map the `year`/`month` switches onto a grouping. Both set is rejected.
    pub fn from_flags(year: bool, month: bool) -> Result<Self> {
        match (year, month) {
            (true, true) => Err(Error::InvalidGrouping),
            (true, false) => Ok(Grouping::Year),
            (false, true) => Ok(Grouping::Month),
            (false, false) => Ok(Grouping::Day),
        }
    }

    fn fields(self) -> usize {
        match self {
            Grouping::Year => 1,
            Grouping::Month => 2,
            Grouping::Day => 3,
        }
    }
}

/// A capture date cut down to a grouping: `YYYY`, `YYYY:MM` or `YYYY:MM:DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateToken(String);

impl DateToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse raw tags onto their local names.
///
/// Empty values are skipped. When the same local name appears under several
/// namespaces (`Image DateTimeOriginal`, `EXIF DateTimeOriginal`) the first one wins.
pub fn metadata_map(tags: &Tags) -> Metadata {
    let mut metadata = Metadata::new();
    for (key, value) in tags {
        if value.is_empty() {
            continue;
        }
        let local = key.split_once(' ').map_or(key.as_str(), |(_, field)| field);
        metadata
            .entry(local.to_string())
            .or_insert_with(|| value.clone());
    }
    metadata
}

/// Date part (`YYYY:MM:DD`) of `DateTimeOriginal`, if present.
pub fn capture_date(metadata: &Metadata) -> Option<String> {
    let raw = metadata.get(CAPTURE_DATE_TAG)?;
    let date = raw.split_whitespace().next()?;
    Some(date.replace('-', ":"))
}

/// Keep the first 1, 2 or 3 colon-separated fields of a date.
///
/// Purely positional: malformed dates are cut the same way, never validated.
pub fn truncate(date: &str, grouping: Grouping) -> DateToken {
    let fields: Vec<&str> = date.split(':').take(grouping.fields()).collect();
    DateToken(fields.join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_duplicate_namespaces_collapse() {
        let raw = tags(&[
            ("Image DateTimeOriginal", "2019:12:14 15:04:33"),
            ("EXIF DateTimeOriginal", "2019:12:14 15:04:33"),
        ]);
        let metadata = metadata_map(&raw);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata["DateTimeOriginal"], "2019:12:14 15:04:33");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let raw = tags(&[
            ("Image DateTimeOriginal", "2018:01:01 00:00:00"),
            ("EXIF DateTimeOriginal", "2019:12:14 15:04:33"),
        ]);
        assert_eq!(metadata_map(&raw)["DateTimeOriginal"], "2018:01:01 00:00:00");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let raw = tags(&[
            ("Image Copyright", ""),
            ("EXIF Copyright", ""),
            ("Image Make", "NIKON CORPORATION"),
        ]);
        let metadata = metadata_map(&raw);
        assert!(!metadata.contains_key("Copyright"));
        assert_eq!(metadata["Make"], "NIKON CORPORATION");
    }

    #[test]
    fn test_empty_value_does_not_shadow_later_value() {
        let raw = tags(&[
            ("Image DateTimeOriginal", ""),
            ("EXIF DateTimeOriginal", "2019:12:14 15:04:33"),
        ]);
        assert_eq!(metadata_map(&raw)["DateTimeOriginal"], "2019:12:14 15:04:33");
    }

    #[test]
    fn test_capture_date() {
        let metadata = metadata_map(&tags(&[("EXIF DateTimeOriginal", "2019:12:14 15:04:33")]));
        assert_eq!(capture_date(&metadata).as_deref(), Some("2019:12:14"));

        let dashed = metadata_map(&tags(&[("EXIF DateTimeOriginal", "2019-12-14 15:04:33")]));
        assert_eq!(capture_date(&dashed).as_deref(), Some("2019:12:14"));

        assert_eq!(capture_date(&Metadata::new()), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("2019:12:14", Grouping::Day).as_str(), "2019:12:14");
        assert_eq!(truncate("2019:12:14", Grouping::Month).as_str(), "2019:12");
        assert_eq!(truncate("2019:12:14", Grouping::Year).as_str(), "2019");
    }

    #[test]
    fn test_truncate_malformed_is_positional() {
        assert_eq!(truncate("0000:00", Grouping::Day).as_str(), "0000:00");
        assert_eq!(truncate("abc:de:fg:hi", Grouping::Month).as_str(), "abc:de");
        assert_eq!(truncate("", Grouping::Year).as_str(), "");
    }

    #[test]
    fn test_grouping_from_flags() {
        assert_eq!(Grouping::from_flags(false, false).unwrap(), Grouping::Day);
        assert_eq!(Grouping::from_flags(false, true).unwrap(), Grouping::Month);
        assert_eq!(Grouping::from_flags(true, false).unwrap(), Grouping::Year);
        assert!(matches!(
            Grouping::from_flags(true, true),
            Err(Error::InvalidGrouping)
        ));
    }
}
