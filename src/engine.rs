use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::FinderConfig;
use crate::core::{Category, CategoryResults, FetchOutcome, SearchResponse, Selection};
use crate::dataset::{DatasetSource, DirectoryDataset, EmbeddedDataset};
use crate::error::Result;
use crate::providers::{DetailProvider, SwapiClient};
use crate::ranking::FuzzyMatcher;

/// Search/open policy applied on top of the matcher and the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Entries kept per category after ranking
    pub max_results: usize,
    /// Detail fetches in flight at once
    pub concurrency: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            concurrency: 4,
        }
    }
}

/// Main lookup orchestrator
pub struct LookupEngine {
    matcher: FuzzyMatcher,
    provider: Arc<dyn DetailProvider>,
    options: SearchOptions,
}

impl LookupEngine {
    pub fn new(source: Arc<dyn DatasetSource>, provider: Arc<dyn DetailProvider>) -> Self {
        Self {
            matcher: FuzzyMatcher::new(source),
            provider,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the dataset source and SWAPI client described by `config`
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        config.validate()?;

        let source: Arc<dyn DatasetSource> = match &config.dataset_dir {
            Some(dir) => {
                tracing::info!("📂 Using datasets from {}", dir.display());
                Arc::new(DirectoryDataset::new(dir))
            }
            None => Arc::new(EmbeddedDataset::new()),
        };
        let provider = Arc::new(SwapiClient::new(config.client_config())?);

        Ok(Self::new(source, provider).with_options(SearchOptions {
            max_results: config.max_results,
            concurrency: config.concurrency,
        }))
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Search every category for raw user input.
    ///
    /// Input is trimmed and lower-cased; blank input yields an empty response
    /// without reading any dataset.
    pub fn search(&self, raw_query: &str) -> Result<SearchResponse> {
        let start = Instant::now();
        let query = raw_query.trim().to_lowercase();

        if query.is_empty() {
            tracing::debug!("Blank query, nothing to search");
            return Ok(SearchResponse::empty(Some(query)));
        }

        tracing::info!("🔍 Searching for: {}", query);

        let mut results = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let mut entries = self.matcher.search(category, &query)?;
            entries.truncate(self.options.max_results);
            results.push(CategoryResults { category, entries });
        }

        Ok(SearchResponse {
            query: Some(query),
            results,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Every record of every category, unscored
    pub fn list_all(&self) -> Result<SearchResponse> {
        let start = Instant::now();

        let mut results = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let entries = self.matcher.list_all(category)?;
            results.push(CategoryResults { category, entries });
        }

        Ok(SearchResponse {
            query: None,
            results,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Fetch details for each selection; one outcome per selection, input order
    pub async fn open_selected(&self, selections: &[Selection]) -> Vec<FetchOutcome> {
        self.open_selected_until(selections, &CancellationToken::new())
            .await
    }

    /// As [`open_selected`](Self::open_selected); unfinished fetches end as
    /// `Cancelled` once `cancel` fires
    pub async fn open_selected_until(
        &self,
        selections: &[Selection],
        cancel: &CancellationToken,
    ) -> Vec<FetchOutcome> {
        let concurrency = self.options.concurrency.max(1);

        stream::iter(selections.iter().copied())
            .map(|selection| async move {
                let result = self
                    .provider
                    .fetch_until(selection.category, selection.id, cancel)
                    .await;

                match &result {
                    Ok(record) => tracing::info!(
                        "✅ Loaded {} {}: {}",
                        selection.category.singular(),
                        selection.id,
                        record.name()
                    ),
                    Err(e) => tracing::warn!(
                        "⚠️ Failed to load {} {}: {}",
                        selection.category.singular(),
                        selection.id,
                        e
                    ),
                }

                FetchOutcome { selection, result }
            })
            .buffered(concurrency)
            .collect()
            .await
    }
}
