use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity kinds served by the catalog, each with its own index file and detail schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Planets,
    Starships,
}

impl Category {
    /// Every category, in the order results are presented.
    pub const ALL: [Category; 3] = [Category::People, Category::Planets, Category::Starships];

    /// Path segment of the remote API (`{base}/{path}/{id}`)
    pub fn api_path(self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Planets => "planets",
            Category::Starships => "starships",
        }
    }

    /// File name of the local index for this category
    pub fn dataset_file(self) -> &'static str {
        match self {
            Category::People => "PeopleQueries.json",
            Category::Planets => "PlanetQueries.json",
            Category::Starships => "StarshipQueries.json",
        }
    }

    /// Singular label used in titles and log lines
    pub fn singular(self) -> &'static str {
        match self {
            Category::People => "person",
            Category::Planets => "planet",
            Category::Starships => "starship",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "people" | "person" => Ok(Category::People),
            "planets" | "planet" => Ok(Category::Planets),
            "starships" | "starship" => Ok(Category::Starships),
            other => Err(format!(
                "unknown category '{}' (expected people, planets or starships)",
                other
            )),
        }
    }
}
