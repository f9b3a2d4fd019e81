use crate::catalog::{CatalogCache, CatalogSource, Entity};
use crate::route::{parse_route_id, slugify};
use std::sync::Arc;

/// Finds the first entity whose raw id equals `id`
pub fn find_by_id<'a>(entities: &'a [Entity], id: &str) -> Option<&'a Entity> {
    entities.iter().find(|e| e.id.as_deref() == Some(id))
}

/// Finds the first entity whose name slugifies to `slug`
pub fn find_by_slug<'a>(entities: &'a [Entity], slug: &str) -> Option<&'a Entity> {
    entities.iter().find(|e| slugify(e.name_str()) == slug)
}

/// Entity lookups against a shared [`CatalogCache`]
///
/// Lookups never write to the cache. An entity found through the direct-fetch
/// fallback of [`by_route_id`](Self::by_route_id) stays invisible to
/// [`by_id`](Self::by_id) until the cache is refreshed.
pub struct CatalogResolver<S> {
    cache: Arc<CatalogCache<S>>,
}

impl<S> Clone for CatalogResolver<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: CatalogSource> CatalogResolver<S> {
    pub fn new(cache: Arc<CatalogCache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<CatalogCache<S>> {
        &self.cache
    }

    /// Looks up an entity by raw id in the cached snapshot
    pub async fn by_id(&self, id: &str) -> Option<Entity> {
        let snapshot = self.cache.get_all().await;
        let found = find_by_id(&snapshot.entities, id).cloned();
        if found.is_none() {
            tracing::debug!("Entity with id {} not found in cache", id);
        }
        found
    }

    /// Looks up an entity by slug in the cached snapshot
    pub async fn by_slug(&self, slug: &str) -> Option<Entity> {
        let snapshot = self.cache.get_all().await;
        let found = find_by_slug(&snapshot.entities, slug).cloned();
        if found.is_none() {
            tracing::debug!("Entity with slug {} not found in cache", slug);
        }
        found
    }

    /// Resolves an `{id}_{slug}` route segment
    ///
    /// The slug part is ignored. When the id is missing from the snapshot,
    /// one direct fetch of that id is attempted to cover entities created
    /// after the snapshot was taken.
    pub async fn by_route_id(&self, route_id: &str) -> Option<Entity> {
        let route = parse_route_id(route_id);
        if route.id.is_empty() {
            tracing::debug!("Route id {:?} has no id part", route_id);
            return None;
        }

        if let Some(entity) = self.by_id(&route.id).await {
            return Some(entity);
        }

        tracing::debug!("Entity {} not in cache, attempting direct fetch", route.id);
        self.cache.source().fetch_by_id(&route.id).await
    }

    /// Route segments for every entity with both an id and a name
    pub async fn route_ids(&self) -> Vec<String> {
        let snapshot = self.cache.get_all().await;
        let routes: Vec<String> = snapshot
            .entities
            .iter()
            .filter(|e| e.name.as_deref().is_some_and(|n| !n.is_empty()))
            .filter_map(|e| e.route_id())
            .collect();
        tracing::info!("Generated {} route ids", routes.len());
        routes
    }

    /// Every id present in the snapshot, in order
    pub async fn ids(&self) -> Vec<String> {
        let snapshot = self.cache.get_all().await;
        snapshot
            .entities
            .iter()
            .filter_map(|e| e.id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }
}
