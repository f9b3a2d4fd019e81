//! Gallery Catalog: catalog resolution for a model and map gallery
//!
//! This crate drains a cursor-paginated dashboard API into memory, caches the
//! snapshot with single-flight fetching, resolves entities by id, slug or
//! route id, groups them by category and picks related items for detail views.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod output;
pub mod ranking;
pub mod route;

use thiserror::Error;

/// Main error type for catalog operations
///
/// Lookups and fetches degrade to partial or absent results instead of
/// returning these; errors are reserved for setup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: String },

    #[error("Invalid route id: {0:?}")]
    InvalidRouteId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browse::{group_by_category, related, CategoryGroups, UNCATEGORIZED};
pub use catalog::{CatalogCache, CatalogResolver, CatalogSource, Entity, FetchOutcome};
pub use config::Config;
pub use route::{compose_route_id, parse_route_id, slugify, RouteId};
