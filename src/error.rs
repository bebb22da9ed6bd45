use std::fmt;
use thiserror::Error;

use crate::core::Category;

/// Why a request never produced an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connect or full-response deadline elapsed
    Timeout,
    /// Any other connection or I/O failure
    Io,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Timeout => f.write_str("timed out"),
            TransportKind::Io => f.write_str("I/O failure"),
        }
    }
}

/// Main error type for dataset loading and detail retrieval
#[derive(Error, Debug)]
pub enum LookupError {
    /// Index file missing or not an array of records
    #[error("Failed to load {category} dataset from {location}: {message}")]
    DatasetLoad {
        category: Category,
        location: String,
        message: String,
    },

    /// 200 response whose body does not match the category schema
    #[error("Could not decode {} {id} from {endpoint}: {source}", .category.singular())]
    Decode {
        category: Category,
        id: i64,
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 404
    #[error("Resource not found: {endpoint}")]
    NotFound {
        category: Category,
        id: i64,
        endpoint: String,
    },

    /// HTTP 5xx
    #[error("Server error ({status}) for: {endpoint}")]
    RemoteServer { status: u16, endpoint: String },

    /// Any other non-200 status
    #[error("Unexpected HTTP status ({status}) for: {endpoint}")]
    Protocol { status: u16, endpoint: String },

    /// Connection, timeout or body read failure
    #[error("Request {kind} for: {endpoint}: {source}")]
    Transport {
        kind: TransportKind,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Caller gave up before the response arrived
    #[error("Request cancelled for: {endpoint}")]
    Cancelled { endpoint: String },

    /// Ids are positive; anything else never reaches the network
    #[error("Invalid {} id {id} for: {endpoint}", .category.singular())]
    InvalidId {
        category: Category,
        id: i64,
        endpoint: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LookupError {
    /// Endpoint of the attempted request, for fetch-side errors
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            LookupError::Decode { endpoint, .. }
            | LookupError::NotFound { endpoint, .. }
            | LookupError::RemoteServer { endpoint, .. }
            | LookupError::Protocol { endpoint, .. }
            | LookupError::Transport { endpoint, .. }
            | LookupError::InvalidId { endpoint, .. }
            | LookupError::Cancelled { endpoint } => Some(endpoint),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            LookupError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LookupError>;
