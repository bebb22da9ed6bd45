use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::Category;
use crate::dataset::{DatasetRecord, DatasetSource};
use crate::error::Result;

/// Snapshot cache over another source.
///
/// Snapshots are loaded completely before being published, so readers see
/// either the previous snapshot or the new one.
pub struct CachedDataset<S> {
    inner: S,
    snapshots: RwLock<HashMap<Category, Arc<[DatasetRecord]>>>,
}

impl<S: DatasetSource> CachedDataset<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Load `category` from the inner source and replace its snapshot
    pub fn reload(&self, category: Category) -> Result<Arc<[DatasetRecord]>> {
        let fresh = self.inner.load(category)?;
        self.snapshots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(category, Arc::clone(&fresh));
        tracing::debug!("Published {} snapshot ({} records)", category, fresh.len());
        Ok(fresh)
    }

    /// Drop every snapshot; the next load goes to the inner source
    pub fn invalidate(&self) {
        self.snapshots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn is_cached(&self, category: Category) -> bool {
        self.snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&category)
    }
}

impl<S: DatasetSource> DatasetSource for CachedDataset<S> {
    fn load(&self, category: Category) -> Result<Arc<[DatasetRecord]>> {
        let cached = self
            .snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&category)
            .cloned();

        match cached {
            Some(snapshot) => Ok(snapshot),
            None => self.reload(category),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
    }

    impl DatasetSource for CountingSource {
        fn load(&self, category: Category) -> Result<Arc<[DatasetRecord]>> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst) as i64;
            if category == Category::Starships {
                return Err(LookupError::DatasetLoad {
                    category,
                    location: "counting".into(),
                    message: "unavailable".into(),
                });
            }
            Ok(vec![DatasetRecord::new(n + 1, ["Record"])].into())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_loads_once_until_reload() {
        let cache = CachedDataset::new(CountingSource {
            loads: AtomicUsize::new(0),
        });

        assert!(!cache.is_cached(Category::People));
        let first = cache.load(Category::People).unwrap();
        let second = cache.load(Category::People).unwrap();
        assert_eq!(first[0].id, Some(1));
        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = cache.reload(Category::People).unwrap();
        assert_eq!(reloaded[0].id, Some(2));
        // Earlier snapshot handles stay intact
        assert_eq!(first[0].id, Some(1));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = CachedDataset::new(CountingSource {
            loads: AtomicUsize::new(0),
        });

        assert!(cache.load(Category::Starships).is_err());
        assert!(!cache.is_cached(Category::Starships));

        cache.load(Category::Planets).unwrap();
        cache.invalidate();
        assert!(!cache.is_cached(Category::Planets));
    }
}
