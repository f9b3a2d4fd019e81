//! Catalog module for fetching, caching, and resolving entities
//!
//! This module contains the data path of the gallery, including:
//! - The entity model shared by models and maps
//! - Cursor-paginated fetching from the dashboard API
//! - A single-flight snapshot cache with an explicit lifetime
//! - Lookups by id, slug, and route id

mod cache;
mod entity;
mod fetcher;
mod resolver;

pub use cache::{CatalogCache, Snapshot};
pub use entity::{CatalogPage, Entity, Texture, PLACEHOLDER_IMAGE};
pub use fetcher::{
    build_http_client, default_headers, fetch_all, fetch_one, Collection, FetchError,
    FetchOutcome, RemoteCatalog,
};
pub use resolver::{find_by_id, find_by_slug, CatalogResolver};

use std::future::Future;

/// Where catalog data comes from
///
/// The cache and resolver only see this trait, so tests and alternative
/// backends can stand in for the HTTP API.
pub trait CatalogSource: Send + Sync {
    /// Loads the whole collection, in source order
    fn fetch_all(&self) -> impl Future<Output = FetchOutcome> + Send;

    /// Loads one entity directly, bypassing any snapshot
    fn fetch_by_id(&self, id: &str) -> impl Future<Output = Option<Entity>> + Send;
}
