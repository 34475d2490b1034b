use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptive labels appended to every folder name of a batch.
///
/// Labels always appear in the order place, reason, people:
/// `2016_12_17_place_reason_people`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePattern {
    #[serde(default)]
    pub place: bool,
    #[serde(default)]
    pub reason: bool,
    #[serde(default)]
    pub people: bool,
}

impl NamePattern {
    pub fn new(place: bool, reason: bool, people: bool) -> Self {
        Self {
            place,
            reason,
            people,
        }
    }

    /// Pattern with every label enabled.
    pub fn all() -> Self {
        Self::new(true, true, true)
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = [
            (self.place, "_place"),
            (self.reason, "_reason"),
            (self.people, "_people"),
        ];
        for (_, label) in labels.iter().filter(|(on, _)| *on) {
            f.write_str(label)?;
        }
        Ok(())
    }
}

/// Folder name for a date token and an opaque suffix.
///
/// Colons of the date become underscores; the suffix is appended untouched.
pub fn folder_name(date_token: &str, name_pattern: &str) -> String {
    format!("{}{}", date_token.replace(':', "_"), name_pattern)
}
