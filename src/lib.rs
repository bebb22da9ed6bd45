//! # SWAPI Finder
//!
//! Entity lookup against the Star Wars API:
//! - Fuzzy name search over local index files (Levenshtein ranking)
//! - Typed detail retrieval for people, planets and starships
//! - Bounded-concurrency, cancellable detail fetches with per-id failures
//! - Interfaces: Rust library, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use swapi_finder::{Category, FinderConfig, LookupEngine, Selection};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = LookupEngine::from_config(&FinderConfig::from_env()?)?;
//!
//!     let response = engine.search("luke")?;
//!     let picks: Vec<Selection> = response
//!         .entries(Category::People)
//!         .iter()
//!         .take(1)
//!         .map(|entry| Selection::of(Category::People, entry))
//!         .collect();
//!
//!     for outcome in engine.open_selected(&picks).await {
//!         println!("{}", outcome.result?.title());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use config::FinderConfig;
pub use self::core::{
    Category, CategoryResults, DetailRecord, FetchOutcome, Person, Planet, RankedEntry,
    SearchResponse, Selection, Starship,
};
pub use dataset::{DatasetRecord, DatasetSource};
pub use engine::{LookupEngine, SearchOptions};
pub use error::{LookupError, Result, TransportKind};
pub use providers::{ClientConfig, DetailProvider, SwapiClient};
pub use ranking::FuzzyMatcher;
pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
