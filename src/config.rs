//! Runtime configuration: YAML file, environment overrides, built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{LookupError, Result};
use crate::providers::swapi::{ClientConfig, DEFAULT_BASE_URL};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_results() -> usize {
    5
}

fn default_concurrency() -> usize {
    4
}

/// Finder configuration.
///
/// # Examples
///
/// ```
/// use swapi_finder::FinderConfig;
///
/// let config = FinderConfig::from_yaml_str("base_url: http://localhost:8080/api\nmax_results: 3\n").unwrap();
/// assert_eq!(config.max_results, 3);
/// assert_eq!(config.timeout_secs, 10); // default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinderConfig {
    /// Remote catalog root, without the category segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request deadline
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect deadline
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Directory holding the three index files; embedded copies when unset
    #[serde(default)]
    pub dataset_dir: Option<PathBuf>,

    /// Entries kept per category after a search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Detail requests allowed in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
            dataset_dir: None,
            max_results: default_max_results(),
            concurrency: default_concurrency(),
        }
    }
}

impl FinderConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|e| LookupError::Config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LookupError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `SWAPI_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup("SWAPI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(dir) = lookup("SWAPI_DATASET_DIR") {
            self.dataset_dir = Some(PathBuf::from(dir));
        }
        override_parsed(&lookup, "SWAPI_TIMEOUT_SECS", &mut self.timeout_secs)?;
        override_parsed(
            &lookup,
            "SWAPI_CONNECT_TIMEOUT_SECS",
            &mut self.connect_timeout_secs,
        )?;
        override_parsed(&lookup, "SWAPI_MAX_RESULTS", &mut self.max_results)?;
        override_parsed(&lookup, "SWAPI_CONCURRENCY", &mut self.concurrency)?;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(LookupError::Config("base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(LookupError::Config("timeouts must be at least 1 second".into()));
        }
        if self.max_results == 0 {
            return Err(LookupError::Config("max_results must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(LookupError::Config("concurrency must be positive".into()));
        }
        Ok(())
    }

    /// Settings for [`crate::providers::SwapiClient::new`]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<()> {
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| LookupError::Config(format!("{} has an invalid value: {:?}", key, raw)))?;
    }
    Ok(())
}
