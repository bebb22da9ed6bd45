use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::Category;
use crate::dataset::{parse_records, DatasetRecord, DatasetSource};
use crate::error::{LookupError, Result};

/// Reads `<dir>/<category file>` from disk on every load
pub struct DirectoryDataset {
    dir: PathBuf,
}

impl DirectoryDataset {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the index file for `category`
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.dir.join(category.dataset_file())
    }
}

impl DatasetSource for DirectoryDataset {
    fn load(&self, category: Category) -> Result<Arc<[DatasetRecord]>> {
        let path = self.path_for(category);
        let location = path.display().to_string();

        let raw = std::fs::read_to_string(&path).map_err(|e| LookupError::DatasetLoad {
            category,
            location: location.clone(),
            message: e.to_string(),
        })?;

        Ok(parse_records(category, &location, &raw)?.into())
    }

    fn name(&self) -> &str {
        "directory"
    }
}
