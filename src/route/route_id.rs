use crate::route::slug::slugify;
use crate::CatalogError;
use std::fmt;
use std::str::FromStr;

/// Separator between the id and the slug in a route segment
pub const SEPARATOR: char = '_';

/// A parsed `{id}_{slug}` route segment
///
/// The slug part is cosmetic: lookups only use `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId {
    /// The raw entity id
    pub id: String,

    /// The slug part, empty when the segment had no separator
    pub slug: String,
}

impl RouteId {
    /// Builds a route id from an entity id and display name
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            slug: slugify(name),
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, SEPARATOR, self.slug)
    }
}

impl FromStr for RouteId {
    type Err = CatalogError;

    /// Parses a route segment, rejecting segments with an empty id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let route = parse_route_id(s.trim());
        if route.id.is_empty() {
            return Err(CatalogError::InvalidRouteId(s.to_string()));
        }
        Ok(route)
    }
}

/// Composes the route segment `"{id}_{slugify(name)}"`
///
/// # Examples
///
/// ```
/// use gallery_catalog::route::compose_route_id;
///
/// assert_eq!(compose_route_id("7", "Red Car"), "7_red-car");
/// ```
pub fn compose_route_id(id: &str, name: &str) -> String {
    format!("{}{}{}", id, SEPARATOR, slugify(name))
}

/// Splits a route segment into id and slug
///
/// The split happens at the last underscore. A slug never contains an
/// underscore, so ids that contain one still round-trip through
/// [`compose_route_id`]. A segment without any underscore is all id.
///
/// # Examples
///
/// ```
/// use gallery_catalog::route::parse_route_id;
///
/// let route = parse_route_id("7_red-car");
/// assert_eq!(route.id, "7");
/// assert_eq!(route.slug, "red-car");
///
/// let bare = parse_route_id("7");
/// assert_eq!(bare.id, "7");
/// assert_eq!(bare.slug, "");
/// ```
pub fn parse_route_id(route_id: &str) -> RouteId {
    match route_id.rsplit_once(SEPARATOR) {
        Some((id, slug)) => RouteId {
            id: id.to_string(),
            slug: slug.to_string(),
        },
        None => RouteId {
            id: route_id.to_string(),
            slug: String::new(),
        },
    }
}
