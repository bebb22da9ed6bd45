pub mod swapi;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::{Category, DetailRecord};
use crate::error::{LookupError, Result};

pub use swapi::{ClientConfig, SwapiClient};

/// Trait for remote detail sources
#[async_trait]
pub trait DetailProvider: Send + Sync {
    /// Fetch one record: a single round trip, no retries, no caching
    async fn fetch(&self, category: Category, id: i64) -> Result<DetailRecord>;

    /// Endpoint `fetch` would request, for diagnostics
    fn endpoint(&self, category: Category, id: i64) -> String;

    /// Get provider name
    fn name(&self) -> &str;

    /// Like `fetch`, but gives up with `Cancelled` as soon as `cancel` fires
    async fn fetch_until(
        &self,
        category: Category,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<DetailRecord> {
        let cancelled = || LookupError::Cancelled {
            endpoint: self.endpoint(category, id),
        };

        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(cancelled()),
            result = self.fetch(category, id) => result,
        }
    }
}
