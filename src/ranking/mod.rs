pub mod distance;
pub mod matcher;

pub use distance::levenshtein;
pub use matcher::{list_records, rank_records, FuzzyMatcher};
