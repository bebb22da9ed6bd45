use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::core::{Category, DetailRecord, Person, Planet, Resource, Starship};
use crate::error::{LookupError, Result, TransportKind};
use crate::providers::DetailProvider;

/// Public SWAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Immutable client settings, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Deadline for the whole request, body included
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Star Wars API client
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    /// Create a client with its own connection pool
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self::with_client(client, config.base_url))
    }

    /// Reuse an existing reqwest client (timeouts are whatever it was built with)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode straight into one category's schema
    pub async fn fetch_as<R: Resource>(&self, id: i64) -> Result<R> {
        let category = R::CATEGORY;
        let endpoint = self.endpoint(category, id);
        if id <= 0 {
            return Err(LookupError::InvalidId {
                category,
                id,
                endpoint,
            });
        }

        tracing::debug!("GET {}", endpoint);
        let body = self.get_body(category, id, &endpoint).await?;

        serde_json::from_str(&body).map_err(|source| LookupError::Decode {
            category,
            id,
            endpoint,
            source,
        })
    }

    pub async fn person(&self, id: i64) -> Result<Person> {
        self.fetch_as(id).await
    }

    pub async fn planet(&self, id: i64) -> Result<Planet> {
        self.fetch_as(id).await
    }

    pub async fn starship(&self, id: i64) -> Result<Starship> {
        self.fetch_as(id).await
    }

    async fn get_body(&self, category: Category, id: i64, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        check_status(response.status(), category, id, endpoint)?;

        response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e))
    }
}

/// Map a response status onto the error taxonomy; only 200 passes
pub(crate) fn check_status(
    status: StatusCode,
    category: Category,
    id: i64,
    endpoint: &str,
) -> Result<()> {
    match status.as_u16() {
        200 => Ok(()),
        404 => Err(LookupError::NotFound {
            category,
            id,
            endpoint: endpoint.to_string(),
        }),
        code @ 500..=599 => Err(LookupError::RemoteServer {
            status: code,
            endpoint: endpoint.to_string(),
        }),
        code => Err(LookupError::Protocol {
            status: code,
            endpoint: endpoint.to_string(),
        }),
    }
}

fn transport_error(endpoint: &str, source: reqwest::Error) -> LookupError {
    let kind = if source.is_timeout() {
        TransportKind::Timeout
    } else {
        TransportKind::Io
    };
    LookupError::Transport {
        kind,
        endpoint: endpoint.to_string(),
        source,
    }
}

#[async_trait]
impl DetailProvider for SwapiClient {
    async fn fetch(&self, category: Category, id: i64) -> Result<DetailRecord> {
        match category {
            Category::People => self.person(id).await.map(DetailRecord::from),
            Category::Planets => self.planet(id).await.map(DetailRecord::from),
            Category::Starships => self.starship(id).await.map(DetailRecord::from),
        }
    }

    fn endpoint(&self, category: Category, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, category.api_path(), id)
    }

    fn name(&self) -> &str {
        "swapi"
    }
}
