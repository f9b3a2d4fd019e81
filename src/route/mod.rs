//! Route handling module for Gallery Catalog
//!
//! This module provides slug derivation from display names and the composite
//! `{id}_{slug}` route segment used by detail pages.

mod route_id;
mod slug;

// Re-export main functions
pub use route_id::{compose_route_id, parse_route_id, RouteId, SEPARATOR};
pub use slug::slugify;

/// Path prefix of the models grid
pub const MODELS_PATH: &str = "/models";

/// Path prefix of the maps grid
pub const MAPS_PATH: &str = "/maps";

/// Builds the detail page path for an entity: `/models/{id}_{slug}`
///
/// # Examples
///
/// ```
/// use gallery_catalog::route::model_detail_path;
///
/// assert_eq!(model_detail_path("42", "Hot Air Balloon"), "/models/42_hot-air-balloon");
/// ```
pub fn model_detail_path(id: &str, name: &str) -> String {
    format!("{}/{}", MODELS_PATH, compose_route_id(id, name))
}

/// Extracts the route id from a detail path, if the path is one
///
/// Accepts an optional trailing slash. Returns `None` for the grid path itself
/// and for anything outside `/models/`.
pub fn route_id_from_path(path: &str) -> Option<RouteId> {
    let rest = path.strip_prefix(MODELS_PATH)?.strip_prefix('/')?;
    let segment = rest.strip_suffix('/').unwrap_or(rest);
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(parse_route_id(segment))
}
