use crate::browse::UNCATEGORIZED;
use crate::route::{compose_route_id, slugify};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Preview shown when an entity carries no image at all
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgdmlld0JveD0iMCAwIDEwMCAxMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSIxMDAiIGhlaWdodD0iMTAwIiByeD0iMjQiIGZpbGw9IiMzMzMiLz48L3N2Zz4=";

/// A catalog item (3D model or map) as returned by the dashboard API
///
/// Every field is optional on the wire. Unknown fields are ignored and a
/// field holding an unexpected JSON type decodes as absent, so one odd value
/// never costs the entity or its page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entity {
    /// Opaque external id; maps send integers, models send strings
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub textures: Vec<Texture>,

    /// Top-level thumbnail (maps)
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,

    /// Preview override, takes precedence over textures
    #[serde(default, deserialize_with = "lenient")]
    pub cover_image: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub map_url: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub premium: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub free_for: Option<i64>,
}

/// An image reference attached to an entity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Texture {
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
}

impl Entity {
    /// Creates an entity with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The id, or `""` when absent
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// The display name, or `""` when absent
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Slug derived from the display name
    pub fn slug(&self) -> String {
        slugify(self.name_str())
    }

    /// Route segment `{id}_{slug}`, if the entity has an id
    pub fn route_id(&self) -> Option<String> {
        self.id
            .as_deref()
            .map(|id| compose_route_id(id, self.name_str()))
    }

    /// Grouping key, falling back to [`UNCATEGORIZED`] when absent or empty
    pub fn category_or_default(&self) -> &str {
        non_empty(self.category.as_deref()).unwrap_or(UNCATEGORIZED)
    }

    /// Canonical preview image
    ///
    /// Order: `cover_image`, first texture thumbnail, top-level `thumbnail`,
    /// then [`PLACEHOLDER_IMAGE`].
    pub fn preview_image(&self) -> &str {
        non_empty(self.cover_image.as_deref())
            .or_else(|| non_empty(self.textures.first().and_then(|t| t.thumbnail.as_deref())))
            .or_else(|| non_empty(self.thumbnail.as_deref()))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// One page of a cursor-paginated collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    /// Entries that are not JSON objects are skipped
    #[serde(default, deserialize_with = "entities_skipping_invalid")]
    pub results: Vec<Entity>,

    #[serde(default, deserialize_with = "lenient")]
    pub next: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Decodes a value, treating null or a type mismatch as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(T::deserialize(Value::deserialize(deserializer)?).ok())
}

/// Decodes a list, dropping elements that do not fit and treating anything
/// other than an array as empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn entities_skipping_invalid<'de, D>(deserializer: D) -> Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match Entity::deserialize(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!("Skipping invalid entity at position {}: {}", position, e);
                None
            }
        })
        .collect())
}
