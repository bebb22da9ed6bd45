pub mod cached;
pub mod embedded;
pub mod file;

use serde_json::Value;
use std::sync::Arc;

use crate::core::Category;
use crate::error::{LookupError, Result};

pub use cached::CachedDataset;
pub use embedded::EmbeddedDataset;
pub use file::DirectoryDataset;

/// Trait for local index sources (one collection per category)
pub trait DatasetSource: Send + Sync {
    /// Load every record of `category`, in stored order
    fn load(&self, category: Category) -> Result<Arc<[DatasetRecord]>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// One raw index entry: an id that may not coerce, and its candidate names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    /// `None` when the stored id is not a valid catalog id
    pub id: Option<i64>,
    pub names: Vec<String>,
}

impl DatasetRecord {
    pub fn new(id: i64, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: Some(id),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Record whose stored id failed coercion
    pub fn without_id(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: None,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a record from one element of the index array.
    ///
    /// Never fails: bad ids become `None`, unusable names become empty.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(coerce_id),
            names: value.get("strings").map(coerce_names).unwrap_or_default(),
        }
    }
}

/// Any JSON number (fractions truncated toward zero) or a decimal integer string.
///
/// Sign is not checked here; non-positive ids are rejected when fetched.
fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// Scalars are stringified and nulls dropped; nested containers void the whole list
fn coerce_names(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => names.push(s.clone()),
            Value::Number(n) => names.push(n.to_string()),
            Value::Bool(b) => names.push(b.to_string()),
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => return Vec::new(),
        }
    }
    names
}

/// Parse a whole index document: must be a JSON array, elements parsed permissively
pub fn parse_records(category: Category, location: &str, raw: &str) -> Result<Vec<DatasetRecord>> {
    let load_error = |message: String| LookupError::DatasetLoad {
        category,
        location: location.to_string(),
        message,
    };

    let document: Value =
        serde_json::from_str(raw).map_err(|e| load_error(format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = document else {
        return Err(load_error("expected an array of records".to_string()));
    };

    let mut records = Vec::with_capacity(items.len());
    for item in &items {
        if !item.is_object() {
            return Err(load_error(format!("expected an object, found {}", item)));
        }
        records.push(DatasetRecord::from_value(item));
    }

    tracing::debug!(
        "Parsed {} {} records from {}",
        records.len(),
        category,
        location
    );
    Ok(records)
}
