use std::sync::Arc;

use crate::core::Category;
use crate::dataset::{parse_records, DatasetRecord, DatasetSource};
use crate::error::Result;

const PEOPLE: &str = include_str!("../../data/PeopleQueries.json");
const PLANETS: &str = include_str!("../../data/PlanetQueries.json");
const STARSHIPS: &str = include_str!("../../data/StarshipQueries.json");

/// Index files bundled into the binary at build time
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDataset;

impl EmbeddedDataset {
    pub fn new() -> Self {
        Self
    }

    fn raw(category: Category) -> &'static str {
        match category {
            Category::People => PEOPLE,
            Category::Planets => PLANETS,
            Category::Starships => STARSHIPS,
        }
    }
}

impl DatasetSource for EmbeddedDataset {
    fn load(&self, category: Category) -> Result<Arc<[DatasetRecord]>> {
        let location = format!("embedded:{}", category.dataset_file());
        Ok(parse_records(category, &location, Self::raw(category))?.into())
    }

    fn name(&self) -> &str {
        "embedded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_datasets_parse() {
        let source = EmbeddedDataset::new();
        for category in Category::ALL {
            let records = source.load(category).unwrap();
            assert!(!records.is_empty(), "{} dataset is empty", category);
            assert!(records.iter().all(|r| r.id.is_some()));
        }
    }

    #[test]
    fn test_bundled_people_contains_luke() {
        let records = EmbeddedDataset::new().load(Category::People).unwrap();
        assert!(records
            .iter()
            .any(|r| r.id == Some(1) && r.names.iter().any(|n| n == "Luke Skywalker")));
    }
}
