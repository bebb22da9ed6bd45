use std::sync::Arc;

use crate::core::{Category, RankedEntry};
use crate::dataset::{DatasetRecord, DatasetSource};
use crate::error::Result;
use crate::ranking::distance::levenshtein;

/// Edit-distance ranking over a category's local index.
///
/// Every call reads the source's current snapshot; nothing is kept between calls.
#[derive(Clone)]
pub struct FuzzyMatcher {
    source: Arc<dyn DatasetSource>,
}

impl FuzzyMatcher {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn DatasetSource> {
        &self.source
    }

    /// One unscored entry per record with a valid id, in stored order
    pub fn list_all(&self, category: Category) -> Result<Vec<RankedEntry>> {
        let records = self.source.load(category)?;
        Ok(list_records(&records))
    }

    /// Entries ordered by closest candidate name, full result set.
    ///
    /// An empty query is a literal query, not "no query"; blank-input
    /// handling belongs to the caller.
    pub fn search(&self, category: Category, query: &str) -> Result<Vec<RankedEntry>> {
        let records = self.source.load(category)?;
        let ranked = rank_records(&records, query);
        tracing::debug!(
            "Ranked {} of {} {} records for {:?}",
            ranked.len(),
            records.len(),
            category,
            query
        );
        Ok(ranked)
    }
}

/// Listing projection: records without a coercible id are skipped
pub fn list_records(records: &[DatasetRecord]) -> Vec<RankedEntry> {
    records
        .iter()
        .filter_map(|record| {
            let id = record.id?;
            Some(RankedEntry::unscored(
                id,
                RankedEntry::display_name(&record.names),
            ))
        })
        .collect()
}

/// Score every record by its closest name (case-folded) and stable-sort ascending.
///
/// Records without an id or without any candidate name contribute nothing.
pub fn rank_records(records: &[DatasetRecord], query: &str) -> Vec<RankedEntry> {
    let query = query.to_lowercase();

    let mut ranked: Vec<RankedEntry> = records
        .iter()
        .filter_map(|record| {
            let id = record.id?;
            let best = record
                .names
                .iter()
                .map(|name| levenshtein(&name.to_lowercase(), &query))
                .min()?;
            Some(RankedEntry::new(
                id,
                RankedEntry::display_name(&record.names),
                best,
            ))
        })
        .collect();

    // Stable: equal scores keep dataset order
    ranked.sort_by_key(|entry| entry.score);
    ranked
}
