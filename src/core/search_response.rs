use serde::{Deserialize, Serialize};

use crate::core::{Category, DetailRecord, RankedEntry};
use crate::error::Result;

/// Ranked entries for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResults {
    pub category: Category,
    pub entries: Vec<RankedEntry>,
}

/// Per-category results of a search or listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Normalized query; `None` for a plain listing
    pub query: Option<String>,

    /// One block per category, in [`Category::ALL`] order
    pub results: Vec<CategoryResults>,

    /// Time spent ranking, in milliseconds
    pub latency_ms: f64,
}

impl SearchResponse {
    /// Response with an empty block for every category
    pub fn empty(query: Option<String>) -> Self {
        Self {
            query,
            results: Category::ALL
                .iter()
                .map(|&category| CategoryResults {
                    category,
                    entries: Vec::new(),
                })
                .collect(),
            latency_ms: 0.0,
        }
    }

    /// Entries for `category` (empty slice when absent)
    pub fn entries(&self, category: Category) -> &[RankedEntry] {
        self.results
            .iter()
            .find(|block| block.category == category)
            .map(|block| block.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Total entries across categories
    pub fn total(&self) -> usize {
        self.results.iter().map(|block| block.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// An entry picked for detail retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub category: Category,
    pub id: i64,
}

impl Selection {
    pub fn new(category: Category, id: i64) -> Self {
        Self { category, id }
    }

    pub fn of(category: Category, entry: &RankedEntry) -> Self {
        Self::new(category, entry.id)
    }
}

/// Result of fetching one selection; failures stay local to it
#[derive(Debug)]
pub struct FetchOutcome {
    pub selection: Selection,
    pub result: Result<DetailRecord>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
