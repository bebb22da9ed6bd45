use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight search-result projection of one index record.
///
/// Lower `score` means a closer match. Listings without a query carry
/// [`RankedEntry::UNSCORED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Catalog id, unique within a category
    pub id: i64,

    /// Comma-joined candidate names, or [`RankedEntry::UNNAMED`]
    pub name: String,

    /// Minimum edit distance between the query and any candidate name
    pub score: usize,
}

impl RankedEntry {
    /// Score used when no query applies; sorts after every real distance.
    pub const UNSCORED: usize = usize::MAX;

    /// Display label for records without any candidate name.
    pub const UNNAMED: &'static str = "Unnamed";

    /// Create an entry scored against a query
    pub fn new(id: i64, name: impl Into<String>, score: usize) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }

    /// Create an entry for a plain listing
    pub fn unscored(id: i64, name: impl Into<String>) -> Self {
        Self::new(id, name, Self::UNSCORED)
    }

    /// Whether this entry came from a scored search
    pub fn is_scored(&self) -> bool {
        self.score != Self::UNSCORED
    }

    /// Build the display name from a record's candidate names
    pub fn display_name(names: &[String]) -> String {
        if names.is_empty() {
            Self::UNNAMED.to_string()
        } else {
            names.join(", ")
        }
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.id, self.name)
    }
}
