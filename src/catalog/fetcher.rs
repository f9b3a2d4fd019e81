//! HTTP fetcher for the dashboard API
//!
//! This module handles all catalog requests, including:
//! - Building HTTP clients with a proper user agent string
//! - Draining cursor-paginated collections into memory
//! - Fetching single entities by id
//!
//! Failures never propagate to the caller. A pagination failure stops the
//! loop and returns what has accumulated, flagged as possibly incomplete.

use crate::catalog::entity::{CatalogPage, Entity};
use crate::catalog::CatalogSource;
use crate::config::{Config, UserAgentConfig};
use crate::{CatalogError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Result of draining a paginated collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Entities in the order the API returned them
    pub entities: Vec<Entity>,

    /// Number of pages loaded successfully
    pub batches: usize,

    /// Set when a page failed and the loop stopped early
    pub possibly_incomplete: bool,
}

/// Why a single page request failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use gallery_catalog::catalog::build_http_client;
/// use gallery_catalog::config::UserAgentConfig;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     client_name: "GalleryCatalog".to_string(),
///     client_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Headers sent with every catalog request
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Drains a cursor-paginated collection starting at `start_url`
///
/// # Request Flow
///
/// 1. GET the current URL and decode `{results, next}`
/// 2. Append `results` to the accumulator
/// 3. If `next` is set, wait `page_delay` and continue with it
/// 4. Stop when `next` is null or empty
///
/// Any non-2xx status, transport error or undecodable body stops the loop.
/// The entities gathered so far are returned with `possibly_incomplete` set.
/// There is no upper bound on the number of pages.
pub async fn fetch_all(
    client: &Client,
    start_url: &str,
    headers: &HeaderMap,
    page_delay: Duration,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        let batch = outcome.batches + 1;
        tracing::info!("Loading batch {} from: {}", batch, url);

        let page = match fetch_page(client, &url, headers).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Error fetching batch {} from {}: {} (keeping {} entities)",
                    batch,
                    url,
                    e,
                    outcome.entities.len()
                );
                outcome.possibly_incomplete = true;
                break;
            }
        };

        tracing::info!("Loaded {} entities in batch {}", page.results.len(), batch);
        outcome.batches = batch;
        outcome.entities.extend(page.results);

        next = page
            .next
            .filter(|n| !n.is_empty())
            .map(|n| resolve_next(&url, &n));

        if next.is_some() && !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }
    }

    tracing::info!(
        "Finished loading {} entities in {} batches{}",
        outcome.entities.len(),
        outcome.batches,
        if outcome.possibly_incomplete {
            " (possibly incomplete)"
        } else {
            ""
        }
    );

    outcome
}

/// Fetches a single entity, returning `None` on 404 or any failure
pub async fn fetch_one(client: &Client, url: &str, headers: &HeaderMap) -> Option<Entity> {
    let response = match client.get(url).headers(headers.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Error fetching entity from {}: {}", url, e);
            return None;
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        tracing::debug!("Entity not found at {}", url);
        return None;
    }
    if !status.is_success() {
        tracing::warn!("Entity fetch from {} failed with HTTP {}", url, status);
        return None;
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Error reading entity body from {}: {}", url, e);
            return None;
        }
    };

    match serde_json::from_str::<Entity>(&body) {
        Ok(entity) => {
            tracing::debug!("Fetched entity {} from {}", entity.id_str(), url);
            Some(entity)
        }
        Err(e) => {
            tracing::warn!("Invalid entity JSON from {}: {}", url, e);
            None
        }
    }
}

async fn fetch_page(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
) -> std::result::Result<CatalogPage, FetchError> {
    let response = client.get(url).headers(headers.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Resolves a `next` cursor against the page it came from
///
/// Absolute cursors pass through unchanged.
fn resolve_next(current: &str, next: &str) -> String {
    Url::parse(current)
        .and_then(|base| base.join(next))
        .map(String::from)
        .unwrap_or_else(|_| next.to_string())
}

/// Which collection of the dashboard API to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Models,
    Maps,
}

/// A [`CatalogSource`] backed by one collection of the dashboard API
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: Client,
    collection_url: Url,
    headers: HeaderMap,
    page_delay: Duration,
}

impl RemoteCatalog {
    /// Creates a source for `collection_url` with JSON headers and a 100ms
    /// delay between pages
    pub fn new(client: Client, collection_url: Url) -> Self {
        Self {
            client,
            collection_url,
            headers: default_headers(),
            page_delay: Duration::from_millis(100),
        }
    }

    /// Builds the source for one collection from the configuration
    ///
    /// Extra headers from `[api.headers]` are sent with every request.
    pub fn from_config(config: &Config, client: Client, collection: Collection) -> Result<Self> {
        let url = match collection {
            Collection::Models => config.api.models_url()?,
            Collection::Maps => config.api.maps_url()?,
        };
        let page_delay = Duration::from_millis(config.api.page_delay_ms);

        let mut source = Self::new(client, url).with_page_delay(page_delay);
        for (name, value) in &config.api.headers {
            source = source.with_header(name, value)?;
        }
        Ok(source)
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Adds an extra header to every request
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let invalid = || CatalogError::InvalidHeader {
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// URL of a single entity: `{collection}/{id}`, with the id percent-encoded
    pub fn item_url(&self, id: &str) -> Option<Url> {
        let mut url = self.collection_url.clone();
        url.set_query(None);
        url.path_segments_mut().ok()?.pop_if_empty().push(id);
        Some(url)
    }
}

impl CatalogSource for RemoteCatalog {
    async fn fetch_all(&self) -> FetchOutcome {
        fetch_all(
            &self.client,
            self.collection_url.as_str(),
            &self.headers,
            self.page_delay,
        )
        .await
    }

    async fn fetch_by_id(&self, id: &str) -> Option<Entity> {
        let url = self.item_url(id)?;
        tracing::debug!("Fetching entity {} directly from {}", id, url);
        fetch_one(&self.client, url.as_str(), &self.headers).await
    }
}
